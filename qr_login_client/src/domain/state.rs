pub const FAILED_MESSAGE: &str =
    "QR authentication was rejected on the mobile device. Please try again.";
pub const EXPIRED_MESSAGE: &str = "The QR code has expired. Generate a new code to try again.";

// Local view of the QR login flow.
//
// `Loading` and `Error` exist only on the client; the other states mirror
// what the server reports for the tracked session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    Loading,
    Pending { session_id: String },
    Authenticated { session_id: String },
    Failed { message: String },
    Expired { message: String },
    Error { message: String },
}

impl LoginState {
    pub fn failed() -> Self {
        LoginState::Failed {
            message: FAILED_MESSAGE.to_string(),
        }
    }

    pub fn expired() -> Self {
        LoginState::Expired {
            message: EXPIRED_MESSAGE.to_string(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LoginState::Authenticated { .. }
                | LoginState::Failed { .. }
                | LoginState::Expired { .. }
                | LoginState::Error { .. }
        )
    }

    // Failure states the user can leave by starting a new session.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LoginState::Failed { .. } | LoginState::Expired { .. } | LoginState::Error { .. }
        )
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoginState::Failed { message }
            | LoginState::Expired { message }
            | LoginState::Error { message } => Some(message),
            _ => None,
        }
    }
}
