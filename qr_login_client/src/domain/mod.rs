mod errors;
mod ports;
mod session;
mod state;

// Re-export the domain boundary types and ports.
pub use errors::{ApiError, HandoffError, LoginError};
pub use ports::{QrAuthApi, SessionHandoff};
pub use session::{
    AuthenticateRequest, AuthenticateResponse, LoginRequest, LoginResponse, QrStatus,
    SessionCreated, SessionStatus, VerifiedIdentity, VerifyTokenRequest,
};
pub use state::{EXPIRED_MESSAGE, FAILED_MESSAGE, LoginState};
