use std::fmt;

// Failure talking to the QR auth backend. The variants keep transport,
// upstream status, and decoding problems apart so callers can report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Transport(String),
    Upstream { status: u16, message: Option<String> },
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "transport error: {err}"),
            ApiError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "upstream error {status}: {message}")
                } else {
                    write!(f, "upstream error {status}")
                }
            }
            ApiError::Decode(err) => write!(f, "response decode error: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub type HandoffError = Box<dyn std::error::Error + Send + Sync>;

// Errors surfaced by `QrLoginPoller::start_session`.
#[derive(Debug)]
pub enum LoginError {
    // The backend refused or could not be reached; retryable by the user.
    CreateSession(ApiError),
    // The attempt was cancelled or superseded while the request was in flight.
    Cancelled,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::CreateSession(err) => write!(f, "failed to create qr session: {err}"),
            LoginError::Cancelled => write!(f, "qr login attempt was cancelled"),
        }
    }
}

impl std::error::Error for LoginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoginError::CreateSession(err) => Some(err),
            LoginError::Cancelled => None,
        }
    }
}
