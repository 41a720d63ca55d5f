use async_trait::async_trait;

use crate::domain::errors::{ApiError, HandoffError};
use crate::domain::session::{SessionCreated, SessionStatus};

// The poller depends on this trait, not the concrete reqwest client.
#[async_trait]
pub trait QrAuthApi: Send + Sync {
    async fn create_session(&self) -> Result<SessionCreated, ApiError>;
    async fn session_status(&self, session_id: &str) -> Result<SessionStatus, ApiError>;
}

// Receives the bearer token once a QR login succeeds and establishes the
// application session with it.
#[async_trait]
pub trait SessionHandoff: Send + Sync {
    async fn establish(&self, token: &str) -> Result<(), HandoffError>;
}
