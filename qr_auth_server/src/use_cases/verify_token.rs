use crate::domain::entities::AccessSession;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AccessTokenStore, Clock};

// Response returned by the token verification use case.
#[derive(Debug)]
pub struct VerifyTokenResponse {
    pub user_id: String,
    pub display_name: String,
    pub session_id: String,
    pub expires_at: u64,
}

// Token verification use case with injected dependencies.
pub struct VerifyTokenUseCase<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> VerifyTokenUseCase<C, S>
where
    C: Clock,
    S: AccessTokenStore,
{
    pub async fn execute(&self, token: String) -> Result<VerifyTokenResponse, AuthError> {
        verify_access_token(&self.clock, &self.store, &token).await
    }
}

// Shared lookup used by the verify endpoint and QR approval.
pub async fn verify_access_token<C, S>(
    clock: &C,
    store: &S,
    token: &str,
) -> Result<VerifyTokenResponse, AuthError>
where
    C: Clock + ?Sized,
    S: AccessTokenStore + ?Sized,
{
    let session = store
        .get(token)
        .await
        .map_err(|_| AuthError::StorageFailure)?
        .ok_or(AuthError::InvalidToken)?;

    if session.expires_at <= clock.now_epoch_seconds() {
        // Best-effort cleanup of expired session.
        let _ = store.remove(token).await;
        return Err(AuthError::SessionExpired);
    }

    Ok(map_session(session))
}

fn map_session(session: AccessSession) -> VerifyTokenResponse {
    VerifyTokenResponse {
        user_id: session.user_id,
        display_name: session.display_name,
        session_id: session.session_id,
        expires_at: session.expires_at,
    }
}
