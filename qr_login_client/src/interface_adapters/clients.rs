use crate::domain::{
    ApiError, AuthenticateRequest, AuthenticateResponse, LoginRequest, LoginResponse, QrAuthApi,
    SessionCreated, SessionStatus, VerifiedIdentity, VerifyTokenRequest,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

// Thin wrapper around reqwest for the QR auth and token endpoints.
#[derive(Clone)]
pub struct QrAuthClient {
    http: Client,
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

impl QrAuthClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    // Mobile side: obtain a bearer token to approve QR sessions with.
    pub async fn login(&self, user_id: &str, display_name: &str) -> Result<LoginResponse, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let res = self
            .http
            .post(url)
            .json(&LoginRequest {
                user_id,
                display_name,
            })
            .send()
            .await
            .map_err(transport)?;
        read_json(res).await
    }

    // Mobile side: approve a scanned session.
    pub async fn authenticate(
        &self,
        session_id: &str,
        mobile_auth_token: &str,
    ) -> Result<AuthenticateResponse, ApiError> {
        let url = format!("{}/qr-auth/authenticate", self.base_url);
        let res = self
            .http
            .post(url)
            .json(&AuthenticateRequest {
                session_id,
                mobile_auth_token,
            })
            .send()
            .await
            .map_err(transport)?;
        read_json(res).await
    }

    pub async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, ApiError> {
        let url = format!("{}/auth/verify-token", self.base_url);
        let res = self
            .http
            .post(url)
            .json(&VerifyTokenRequest { token })
            .send()
            .await
            .map_err(transport)?;
        read_json(res).await
    }
}

#[async_trait]
impl QrAuthApi for QrAuthClient {
    async fn create_session(&self) -> Result<SessionCreated, ApiError> {
        let url = format!("{}/qr-auth/session", self.base_url);
        let res = self.http.post(url).send().await.map_err(transport)?;
        read_json(res).await
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus, ApiError> {
        let url = format!("{}/qr-auth/status/{}", self.base_url, session_id);
        let res = self.http.get(url).send().await.map_err(transport)?;
        read_json(res).await
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    let status = res.status();

    // Keep upstream status/message so callers can show what went wrong.
    if !status.is_success() {
        let message = res
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|payload| payload.message);
        return Err(ApiError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    res.json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}
