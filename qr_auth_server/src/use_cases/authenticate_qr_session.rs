use tracing::{info, warn};

use crate::domain::entities::{QrAuthStatus, QrSession};
use crate::domain::errors::{AuthError, QrAuthError};
use crate::domain::ports::{AccessTokenStore, Clock, QrSessionStore};
use crate::use_cases::login::issue_token;
use crate::use_cases::qr_session_status::load_live_session;
use crate::use_cases::verify_token::verify_access_token;

// Response returned when a mobile user approves a QR session.
#[derive(Debug)]
pub struct AuthenticateQrSessionResponse {
    pub session_id: String,
    pub user_id: String,
}

// Mobile-side approval of a PENDING QR session. On success a new web token
// is minted for the mobile user and parked on the session for the poller.
pub struct AuthenticateQrSessionUseCase<C, Q, T> {
    pub clock: C,
    pub qr_store: Q,
    pub tokens: T,
    pub session_ttl_seconds: u64,
    pub token_ttl_seconds: u64,
}

impl<C, Q, T> AuthenticateQrSessionUseCase<C, Q, T>
where
    C: Clock,
    Q: QrSessionStore,
    T: AccessTokenStore,
{
    pub async fn execute(
        &self,
        session_id: String,
        mobile_auth_token: String,
    ) -> Result<AuthenticateQrSessionResponse, QrAuthError> {
        let now = self.clock.now_epoch_seconds();
        let mut session = load_live_session(&self.qr_store, &session_id, now)
            .await?
            .ok_or(QrAuthError::SessionNotFound)?;

        if session.status != QrAuthStatus::Pending {
            return Err(QrAuthError::SessionNotPending(session.status));
        }

        let identity = match verify_access_token(&self.clock, &self.tokens, &mobile_auth_token).await
        {
            Ok(identity) => identity,
            Err(AuthError::StorageFailure) => {
                self.mark_failed(&session_id, session).await;
                return Err(QrAuthError::StorageFailure);
            }
            Err(err) => {
                info!(%session_id, reason = %err, "qr session rejected mobile token");
                session.status = QrAuthStatus::Failed;
                self.write(&session_id, session).await?;
                return Err(QrAuthError::InvalidMobileToken);
            }
        };

        let issued = match issue_token(
            &self.clock,
            &self.tokens,
            identity.user_id.clone(),
            identity.display_name,
            self.token_ttl_seconds,
        )
        .await
        {
            Ok(issued) => issued,
            Err(_) => {
                self.mark_failed(&session_id, session).await;
                return Err(QrAuthError::StorageFailure);
            }
        };

        session.status = QrAuthStatus::Authenticated;
        session.user_id = Some(identity.user_id.clone());
        session.web_token = Some(issued.token.clone());
        if let Err(err) = self.write(&session_id, session).await {
            // The token never reached a session, so it must not stay valid.
            if let Err(remove_err) = self.tokens.remove(&issued.token).await {
                warn!(%session_id, error = %remove_err, "failed to revoke orphaned web token");
            }
            return Err(err);
        }

        info!(%session_id, user_id = %identity.user_id, "qr session authenticated");
        Ok(AuthenticateQrSessionResponse {
            session_id,
            user_id: identity.user_id,
        })
    }

    // Every write refreshes the session TTL. Writes only land on a session
    // that is still PENDING, so concurrent approvals cannot both succeed.
    async fn write(&self, session_id: &str, mut session: QrSession) -> Result<(), QrAuthError> {
        let now = self.clock.now_epoch_seconds();
        session.expires_at = now + self.session_ttl_seconds;
        let replaced = self
            .qr_store
            .replace_pending(session_id, session)
            .await
            .map_err(|_| QrAuthError::StorageFailure)?;
        if replaced {
            return Ok(());
        }

        info!(%session_id, "qr session changed while it was being approved");
        match load_live_session(&self.qr_store, session_id, now).await? {
            Some(current) => Err(QrAuthError::SessionNotPending(current.status)),
            None => Err(QrAuthError::SessionNotFound),
        }
    }

    async fn mark_failed(&self, session_id: &str, mut session: QrSession) {
        session.status = QrAuthStatus::Failed;
        if let Err(err) = self.write(session_id, session).await {
            warn!(%session_id, error = %err, "failed to mark qr session as failed");
        }
    }
}
