use crate::domain::entities::{QrAuthStatus, QrSession};
use crate::domain::errors::QrAuthError;
use crate::domain::ports::{Clock, QrSessionStore};

// Response returned by the QR status use case.
#[derive(Debug)]
pub struct QrSessionStatusResponse {
    pub session_id: String,
    pub status: QrAuthStatus,
    pub token: Option<String>,
    pub message: String,
}

// Reports the current state of a QR session to the polling web client.
pub struct QrSessionStatusUseCase<C, Q> {
    pub clock: C,
    pub store: Q,
}

impl<C, Q> QrSessionStatusUseCase<C, Q>
where
    C: Clock,
    Q: QrSessionStore,
{
    pub async fn execute(&self, session_id: String) -> Result<QrSessionStatusResponse, QrAuthError> {
        let now = self.clock.now_epoch_seconds();
        let Some(session) = load_live_session(&self.store, &session_id, now).await? else {
            return Ok(QrSessionStatusResponse {
                session_id,
                status: QrAuthStatus::Expired,
                token: None,
                message: "Session not found or expired.".to_string(),
            });
        };

        let token = match session.status {
            QrAuthStatus::Authenticated => session.web_token,
            _ => None,
        };

        Ok(QrSessionStatusResponse {
            session_id,
            status: session.status,
            token,
            message: format!("Current status: {}", session.status),
        })
    }
}

// Load a session, treating records past their expiry as absent.
pub(crate) async fn load_live_session<Q>(
    store: &Q,
    session_id: &str,
    now: u64,
) -> Result<Option<QrSession>, QrAuthError>
where
    Q: QrSessionStore + ?Sized,
{
    let session = store
        .get(session_id)
        .await
        .map_err(|_| QrAuthError::StorageFailure)?;

    match session {
        Some(session) if session.expires_at <= now => {
            // Best-effort cleanup of expired session.
            let _ = store.remove(session_id).await;
            Ok(None)
        }
        other => Ok(other),
    }
}
