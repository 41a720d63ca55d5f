// Use cases layer: QR session and access token workflows.

pub mod authenticate_qr_session;
pub mod create_qr_session;
pub mod login;
pub mod qr_session_status;
pub mod verify_token;

#[cfg(test)]
pub(crate) mod test_support;
