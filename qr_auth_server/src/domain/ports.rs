use async_trait::async_trait;

use crate::domain::entities::{AccessSession, QrSession};

// Port for bearer token storage used by access token use cases.
#[async_trait]
pub trait AccessTokenStore: Send + Sync {
    async fn insert(&self, token: String, session: AccessSession) -> Result<(), String>;
    async fn get(&self, token: &str) -> Result<Option<AccessSession>, String>;
    async fn remove(&self, token: &str) -> Result<bool, String>;
}

// Port for QR session storage. `put` both creates and overwrites.
// `replace_pending` swaps the record atomically, and only while the stored
// one is still PENDING; it returns false when nothing was written.
#[async_trait]
pub trait QrSessionStore: Send + Sync {
    async fn put(&self, session_id: String, session: QrSession) -> Result<(), String>;
    async fn replace_pending(&self, session_id: &str, session: QrSession) -> Result<bool, String>;
    async fn get(&self, session_id: &str) -> Result<Option<QrSession>, String>;
    async fn remove(&self, session_id: &str) -> Result<bool, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_seconds(&self) -> u64;
}
