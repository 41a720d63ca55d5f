use uuid::Uuid;

use crate::domain::entities::QrSession;
use crate::domain::errors::QrAuthError;
use crate::domain::ports::{Clock, QrSessionStore};

// Response returned by the QR session creation use case.
#[derive(Debug)]
pub struct CreateQrSessionResponse {
    pub session_id: String,
    pub expires_at: u64,
}

// Opens a new PENDING QR session that a mobile user can approve.
pub struct CreateQrSessionUseCase<C, Q> {
    pub clock: C,
    pub store: Q,
    pub ttl_seconds: u64,
}

impl<C, Q> CreateQrSessionUseCase<C, Q>
where
    C: Clock,
    Q: QrSessionStore,
{
    pub async fn execute(&self) -> Result<CreateQrSessionResponse, QrAuthError> {
        let session_id = Uuid::new_v4().to_string();
        let expires_at = self.clock.now_epoch_seconds() + self.ttl_seconds;

        self.store
            .put(session_id.clone(), QrSession::pending(expires_at))
            .await
            .map_err(|_| QrAuthError::StorageFailure)?;

        Ok(CreateQrSessionResponse {
            session_id,
            expires_at,
        })
    }
}
