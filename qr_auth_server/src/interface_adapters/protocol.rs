use serde::{Deserialize, Serialize};

use crate::domain::entities::QrAuthStatus;

// Response payload for QR session creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrSessionResponse {
    pub session_id: String,
    pub message: String,
}

// Response payload for QR session status polling.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrSessionStatusResponse {
    pub session_id: String,
    pub status: QrAuthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub message: String,
}

// Request payload sent by the mobile side to approve a QR session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateQrSessionRequest {
    pub session_id: String,
    pub mobile_auth_token: String,
}

// Response payload for a successful mobile approval.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateQrSessionResponse {
    pub session_id: String,
    pub message: String,
}

// Request payload for login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub display_name: String,
}

// Response payload for login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: u64,
}

// Request payload for token verification.
#[derive(Debug, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

// Response payload for token verification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub user_id: String,
    pub display_name: String,
    pub session_id: String,
    pub expires_at: u64,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
