use std::{env, path::PathBuf, time::Duration};

// Client settings read from the environment.

pub fn api_base_url() -> String {
    env::var("QR_AUTH_API_URL").unwrap_or_else(|_| "http://localhost:8484/api".to_string())
}

pub fn poll_interval() -> Duration {
    let millis = env::var("QR_POLL_INTERVAL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .unwrap_or(3000);
    Duration::from_millis(millis)
}

pub fn request_timeout() -> Duration {
    let millis = env::var("QR_REQUEST_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(5000);
    Duration::from_millis(millis)
}

// Where the access token lands after a successful login; unset prints it.
pub fn token_path() -> Option<PathBuf> {
    env::var_os("QR_TOKEN_PATH")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
