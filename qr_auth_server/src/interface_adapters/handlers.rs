use crate::domain::errors::{AuthError, QrAuthError};
use crate::interface_adapters::protocol::{
    AuthenticateQrSessionRequest, AuthenticateQrSessionResponse, CreateQrSessionResponse,
    ErrorResponse, LoginRequest, LoginResponse, QrSessionStatusResponse, VerifyTokenRequest,
    VerifyTokenResponse,
};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::authenticate_qr_session::AuthenticateQrSessionUseCase;
use crate::use_cases::create_qr_session::CreateQrSessionUseCase;
use crate::use_cases::login::LoginUseCase;
use crate::use_cases::qr_session_status::QrSessionStatusUseCase;
use crate::use_cases::verify_token::VerifyTokenUseCase;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

type HandlerError = (StatusCode, Json<ErrorResponse>);

// Handler for opening a new QR login session.
#[tracing::instrument(name = "create_qr_session", skip_all)]
pub async fn create_qr_session(
    State(state): State<AppState>,
) -> Result<Json<CreateQrSessionResponse>, HandlerError> {
    let use_case = CreateQrSessionUseCase {
        clock: SystemClock,
        store: state.qr_store(),
        ttl_seconds: state.ttls.qr_session_seconds,
    };

    let result = use_case
        .execute()
        .await
        .map_err(|err| map_qr_error(err, QrErrorContext::Create))?;

    tracing::info!(session_id = %result.session_id, "qr session created");

    Ok(Json(CreateQrSessionResponse {
        session_id: result.session_id,
        message: "QR session created.".to_string(),
    }))
}

// Handler polled by the web client for QR session progress.
#[tracing::instrument(name = "qr_session_status", skip(state))]
pub async fn qr_session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<QrSessionStatusResponse>, HandlerError> {
    let use_case = QrSessionStatusUseCase {
        clock: SystemClock,
        store: state.qr_store(),
    };

    let result = use_case
        .execute(session_id)
        .await
        .map_err(|err| map_qr_error(err, QrErrorContext::Status))?;

    tracing::debug!(status = %result.status, "qr session status served");

    Ok(Json(QrSessionStatusResponse {
        session_id: result.session_id,
        status: result.status,
        token: result.token,
        message: result.message,
    }))
}

// Handler for the mobile side approving a QR session.
#[tracing::instrument(
    name = "authenticate_qr_session",
    skip_all,
    fields(session_id = %payload.session_id)
)]
pub async fn authenticate_qr_session(
    State(state): State<AppState>,
    Json(payload): Json<AuthenticateQrSessionRequest>,
) -> Result<Json<AuthenticateQrSessionResponse>, HandlerError> {
    let use_case = AuthenticateQrSessionUseCase {
        clock: SystemClock,
        qr_store: state.qr_store(),
        tokens: state.token_store(),
        session_ttl_seconds: state.ttls.qr_session_seconds,
        token_ttl_seconds: state.ttls.access_token_seconds,
    };

    let result = use_case
        .execute(payload.session_id, payload.mobile_auth_token)
        .await
        .map_err(|err| map_qr_error(err, QrErrorContext::Authenticate))?;

    Ok(Json(AuthenticateQrSessionResponse {
        session_id: result.session_id,
        message: format!("QR session authenticated for {}.", result.user_id),
    }))
}

// Handler for issuing a bearer token.
#[tracing::instrument(name = "login", skip_all, fields(user_id = %payload.user_id))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HandlerError> {
    let use_case = LoginUseCase {
        clock: SystemClock,
        store: state.token_store(),
        ttl_seconds: state.ttls.access_token_seconds,
    };

    let result = use_case
        .execute(payload)
        .await
        .map_err(|err| map_auth_error(err, AuthErrorContext::Login))?;

    Ok(Json(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
    }))
}

// Handler for verifying a bearer token.
pub async fn verify_token(
    State(state): State<AppState>,
    Json(payload): Json<VerifyTokenRequest>,
) -> Result<Json<VerifyTokenResponse>, HandlerError> {
    let use_case = VerifyTokenUseCase {
        clock: SystemClock,
        store: state.token_store(),
    };

    let result = use_case
        .execute(payload.token)
        .await
        .map_err(|err| map_auth_error(err, AuthErrorContext::VerifyToken))?;

    Ok(Json(VerifyTokenResponse {
        user_id: result.user_id,
        display_name: result.display_name,
        session_id: result.session_id,
        expires_at: result.expires_at,
    }))
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

enum QrErrorContext {
    Create,
    Status,
    Authenticate,
}

fn map_qr_error(err: QrAuthError, context: QrErrorContext) -> HandlerError {
    match (context, err) {
        (QrErrorContext::Authenticate, QrAuthError::SessionNotFound) => {
            error_response(StatusCode::NOT_FOUND, "Session not found or expired.")
        }
        (QrErrorContext::Authenticate, QrAuthError::SessionNotPending(status)) => error_response(
            StatusCode::CONFLICT,
            &format!("Session is not pending. Current: {status}"),
        ),
        (QrErrorContext::Authenticate, QrAuthError::InvalidMobileToken) => {
            error_response(StatusCode::UNAUTHORIZED, "invalid mobile auth token")
        }
        (_, QrAuthError::StorageFailure) => {
            warn!("qr session storage failure");
            error_response(StatusCode::BAD_GATEWAY, "storage error")
        }
        (QrErrorContext::Create | QrErrorContext::Status, err) => {
            warn!(error = %err, "unexpected qr session error");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "unexpected error")
        }
    }
}

// Maps domain errors to HTTP responses by endpoint context.
enum AuthErrorContext {
    Login,
    VerifyToken,
}

fn map_auth_error(err: AuthError, context: AuthErrorContext) -> HandlerError {
    match context {
        AuthErrorContext::Login => match err {
            AuthError::InvalidUserId => error_response(StatusCode::BAD_REQUEST, "user_id is required"),
            AuthError::InvalidDisplayName => {
                error_response(StatusCode::BAD_REQUEST, "invalid display_name")
            }
            AuthError::StorageFailure | AuthError::InvalidToken | AuthError::SessionExpired => {
                error_response(StatusCode::BAD_GATEWAY, "storage error")
            }
        },
        AuthErrorContext::VerifyToken => match err {
            AuthError::InvalidToken => {
                error_response(StatusCode::UNAUTHORIZED, "invalid session token")
            }
            AuthError::SessionExpired => error_response(StatusCode::UNAUTHORIZED, "session expired"),
            AuthError::StorageFailure => error_response(StatusCode::BAD_GATEWAY, "storage error"),
            AuthError::InvalidUserId | AuthError::InvalidDisplayName => {
                error_response(StatusCode::BAD_REQUEST, "invalid session data")
            }
        },
    }
}
