use crate::interface_adapters::handlers::{
    authenticate_qr_session, create_qr_session, login, qr_session_status, verify_token,
};
use crate::interface_adapters::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/qr-auth/session", post(create_qr_session))
        .route("/qr-auth/status/{session_id}", get(qr_session_status))
        .route("/qr-auth/authenticate", post(authenticate_qr_session))
        .route("/auth/login", post(login))
        .route("/auth/verify-token", post(verify_token));

    // Mounted under /api to match the web client's base URL.
    Router::new().nest("/api", api).with_state(state)
}
