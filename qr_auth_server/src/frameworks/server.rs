// Framework bootstrap for the QR auth service.

use crate::frameworks::config;
use crate::interface_adapters::routes::app;
use crate::domain::ports::Clock;
use crate::interface_adapters::state::{AppState, SystemClock, Ttls};
use std::io::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, ttls: Ttls) -> Result<()> {
    let address = listener.local_addr()?;
    // In-memory stores for QR sessions and bearer tokens.
    let state = AppState::new(ttls);
    let sweeper = spawn_expiry_sweeper(state.clone(), config::expiry_sweep_interval());
    let app = app(state);

    tracing::info!(
        %address,
        qr_session_ttl_seconds = ttls.qr_session_seconds,
        access_token_ttl_seconds = ttls.access_token_seconds,
        "listening"
    );

    // Serve app and report errors rather than panicking.
    let served = axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    });
    sweeper.abort();
    served
}

// Evicts expired QR sessions and tokens on a fixed period. `period` must be
// non-zero.
pub fn spawn_expiry_sweeper(state: AppState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let (sessions, tokens) = state.evict_expired(SystemClock.now_epoch_seconds()).await;
            if sessions + tokens > 0 {
                tracing::debug!(sessions, tokens, "evicted expired entries");
            }
        }
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config::ttls()).await
}
