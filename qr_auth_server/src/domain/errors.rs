use std::fmt;

// Domain-level errors for access token workflows.
#[derive(Debug)]
pub enum AuthError {
    InvalidUserId,
    InvalidDisplayName,
    InvalidToken,
    SessionExpired,
    StorageFailure,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidUserId => write!(f, "user_id is required"),
            AuthError::InvalidDisplayName => write!(f, "invalid display_name"),
            AuthError::InvalidToken => write!(f, "invalid session token"),
            AuthError::SessionExpired => write!(f, "session expired"),
            AuthError::StorageFailure => write!(f, "storage error"),
        }
    }
}

impl std::error::Error for AuthError {}

// Domain-level errors for QR session workflows.
#[derive(Debug)]
pub enum QrAuthError {
    SessionNotFound,
    SessionNotPending(crate::domain::entities::QrAuthStatus),
    InvalidMobileToken,
    StorageFailure,
}

impl fmt::Display for QrAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrAuthError::SessionNotFound => write!(f, "session not found or expired"),
            QrAuthError::SessionNotPending(status) => {
                write!(f, "session is not pending (current: {status})")
            }
            QrAuthError::InvalidMobileToken => write!(f, "invalid mobile auth token"),
            QrAuthError::StorageFailure => write!(f, "storage error"),
        }
    }
}

impl std::error::Error for QrAuthError {}
