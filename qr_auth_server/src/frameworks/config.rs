use std::env;
use std::time::Duration;

use crate::interface_adapters::state::Ttls;

// Runtime/server settings read from the environment.

pub fn http_port() -> u16 {
    env::var("QR_AUTH_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8484)
}

// QR sessions live for five minutes from their last write.
pub fn qr_session_ttl_seconds() -> u64 {
    env::var("QR_SESSION_TTL_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5 * 60)
}

pub fn access_token_ttl_seconds() -> u64 {
    env::var("ACCESS_TOKEN_TTL_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60 * 60)
}

// How often expired sessions and tokens are swept from memory.
pub fn expiry_sweep_interval() -> Duration {
    let seconds = env::var("EXPIRY_SWEEP_INTERVAL_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v: &u64| *v > 0)
        .unwrap_or(30);
    Duration::from_secs(seconds)
}

pub fn ttls() -> Ttls {
    Ttls {
        qr_session_seconds: qr_session_ttl_seconds(),
        access_token_seconds: access_token_ttl_seconds(),
    }
}
