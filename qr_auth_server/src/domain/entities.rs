use serde::{Deserialize, Serialize};
use std::fmt;

// Lifecycle of a QR login session as seen by both the web and mobile side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrAuthStatus {
    Pending,
    Authenticated,
    Failed,
    Expired,
}

impl QrAuthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrAuthStatus::Pending => "PENDING",
            QrAuthStatus::Authenticated => "AUTHENTICATED",
            QrAuthStatus::Failed => "FAILED",
            QrAuthStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for QrAuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// QR session record keyed by its session id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrSession {
    pub status: QrAuthStatus,
    // Set once a mobile user approves the session.
    pub user_id: Option<String>,
    // Web token issued on approval; only exposed while AUTHENTICATED.
    pub web_token: Option<String>,
    pub expires_at: u64,
}

impl QrSession {
    pub fn pending(expires_at: u64) -> Self {
        Self {
            status: QrAuthStatus::Pending,
            user_id: None,
            web_token: None,
            expires_at,
        }
    }
}

// Bearer token session record stored in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessSession {
    pub user_id: String,
    pub display_name: String,
    pub session_id: String,
    pub expires_at: u64,
}
