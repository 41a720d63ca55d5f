use uuid::Uuid;

use crate::domain::entities::AccessSession;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AccessTokenStore, Clock};
use crate::interface_adapters::protocol::LoginRequest;

// Token issued to a user, either on direct login or on QR approval.
#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
    pub display_name: String,
}

// Login use case with injected dependencies. The mobile side uses the
// resulting token as its `mobileAuthToken`.
pub struct LoginUseCase<C, S> {
    pub clock: C,
    pub store: S,
    pub ttl_seconds: u64,
}

impl<C, S> LoginUseCase<C, S>
where
    C: Clock,
    S: AccessTokenStore,
{
    pub async fn execute(&self, payload: LoginRequest) -> Result<IssuedToken, AuthError> {
        if payload.user_id.trim().is_empty() {
            return Err(AuthError::InvalidUserId);
        }
        let display_name = validate_display_name(&payload.display_name)?;

        issue_token(
            &self.clock,
            &self.store,
            payload.user_id,
            display_name,
            self.ttl_seconds,
        )
        .await
    }
}

// Mint a fresh bearer token for an already validated identity.
pub async fn issue_token<C, S>(
    clock: &C,
    store: &S,
    user_id: String,
    display_name: String,
    ttl_seconds: u64,
) -> Result<IssuedToken, AuthError>
where
    C: Clock + ?Sized,
    S: AccessTokenStore + ?Sized,
{
    let token = Uuid::new_v4().to_string();
    let expires_at = clock.now_epoch_seconds() + ttl_seconds;

    let session = AccessSession {
        user_id,
        display_name: display_name.clone(),
        session_id: Uuid::new_v4().to_string(),
        expires_at,
    };

    store
        .insert(token.clone(), session)
        .await
        .map_err(|_| AuthError::StorageFailure)?;

    Ok(IssuedToken {
        token,
        expires_at,
        display_name,
    })
}

fn validate_display_name(value: &str) -> Result<String, AuthError> {
    // Keep names compact and readable for UI and logs.
    const MIN_LEN: usize = 3;
    const MAX_LEN: usize = 32;

    let len = value.chars().count();

    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(AuthError::InvalidDisplayName);
    }
    if value.trim() != value {
        return Err(AuthError::InvalidDisplayName);
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
    {
        return Err(AuthError::InvalidDisplayName);
    }

    Ok(value.to_string())
}
