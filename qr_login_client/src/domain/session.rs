use serde::{Deserialize, Serialize};
use std::fmt;

// Wire shapes live here as well; keeping serde on the domain types is a
// pragmatic shortcut for such a small API surface.

// Server-side status of a QR login session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrStatus {
    Pending,
    Authenticated,
    Failed,
    Expired,
}

impl QrStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, QrStatus::Pending)
    }
}

impl fmt::Display for QrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QrStatus::Pending => "PENDING",
            QrStatus::Authenticated => "AUTHENTICATED",
            QrStatus::Failed => "FAILED",
            QrStatus::Expired => "EXPIRED",
        };
        f.write_str(label)
    }
}

// Payload returned by `POST /qr-auth/session`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: String,
    #[serde(default)]
    pub message: String,
}

// Payload returned by `GET /qr-auth/status/{sessionId}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub session_id: String,
    pub status: QrStatus,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: String,
}

// Payload the mobile side sends to approve a session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest<'a> {
    pub session_id: &'a str,
    pub mobile_auth_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    #[serde(default)]
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub user_id: &'a str,
    pub display_name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: u64,
}

#[derive(Debug, Serialize)]
pub struct VerifyTokenRequest<'a> {
    pub token: &'a str,
}

// Identity behind a bearer token, as reported by the auth service.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedIdentity {
    pub user_id: String,
    pub display_name: String,
    pub session_id: String,
    pub expires_at: u64,
}
