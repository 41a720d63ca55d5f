// Runtime bootstrap and command dispatch for the `qr-login` binary.

use crate::domain::{ApiError, LoginState, QrAuthApi, SessionHandoff};
use crate::frameworks::cli::{Cli, Command};
use crate::frameworks::config;
use crate::interface_adapters::clients::QrAuthClient;
use crate::interface_adapters::handoff::TokenHandoff;
use crate::interface_adapters::render::render_session_qr;
use crate::use_cases::{PollerSettings, QrLoginPoller};
use std::error::Error;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

pub fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so the QR code owns stdout.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let base_url = cli.api_url.unwrap_or_else(config::api_base_url);
    let timeout = config::request_timeout();
    let client = QrAuthClient::new(base_url.clone(), timeout)?;
    tracing::debug!(
        base_url = %base_url,
        request_timeout_ms = timeout.as_millis(),
        "qr auth client configured"
    );

    match cli.command.unwrap_or(Command::Login { interval_ms: None }) {
        Command::Login { interval_ms } => {
            let interval = interval_ms
                .filter(|millis| *millis > 0)
                .map(Duration::from_millis)
                .unwrap_or_else(config::poll_interval);
            let poller = QrLoginPoller::new(
                client,
                TokenHandoff::new(config::token_path()),
                PollerSettings { interval },
            );
            let mut input = BufReader::new(tokio::io::stdin()).lines();
            login_flow(&poller, &mut input).await
        }
        Command::MobileLogin {
            user_id,
            display_name,
        } => {
            let issued = client.login(&user_id, &display_name).await?;
            println!("mobile auth token: {}", issued.token);
            println!("expires at (epoch seconds): {}", issued.expires_at);
            Ok(())
        }
        Command::Simulate {
            session_id,
            mobile_token,
        } => match client.authenticate(&session_id, &mobile_token).await {
            Ok(res) => {
                println!("authentication succeeded: {}", res.message);
                Ok(())
            }
            Err(err) => {
                println!("authentication failed: {}", failure_message(&err));
                Err(err.into())
            }
        },
        Command::Verify { token } => {
            let identity = client.verify_token(&token).await?;
            println!(
                "token belongs to {} ({}), expires at {}",
                identity.user_id, identity.display_name, identity.expires_at
            );
            Ok(())
        }
    }
}

// Runs QR attempts until one succeeds, the user declines a retry, or Ctrl-C.
// Every attempt starts from a brand new session.
async fn login_flow<A, H, R>(
    poller: &QrLoginPoller<A, H>,
    input: &mut Lines<R>,
) -> Result<(), Box<dyn Error>>
where
    A: QrAuthApi + 'static,
    H: SessionHandoff + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut states = poller.subscribe();

    loop {
        if let Ok(session_id) = poller.start_session().await {
            show_session(&session_id);
        }

        let state = tokio::select! {
            state = states.wait_for(LoginState::is_terminal) => state.map(|state| state.clone())?,
            _ = tokio::signal::ctrl_c() => {
                poller.cancel();
                println!("QR login cancelled.");
                return Ok(());
            }
        };

        if let LoginState::Authenticated { .. } = state {
            println!("Logged in.");
            return Ok(());
        }

        println!("{}", state.message().unwrap_or("QR login failed."));
        if !prompt_retry(input).await? {
            return Err("qr login was not completed".into());
        }
    }
}

fn show_session(session_id: &str) {
    match render_session_qr(session_id) {
        Ok(qr) => println!("{qr}"),
        Err(err) => tracing::warn!(error = %err, "failed to render qr code"),
    }
    println!("Scan with the mobile app, or enter session id: {session_id}");
    println!("Waiting for approval...");
}

async fn prompt_retry<R>(input: &mut Lines<R>) -> std::io::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    print!("Retry with a new QR code? [Y/n] ");
    std::io::stdout().flush()?;

    let Some(line) = input.next_line().await? else {
        return Ok(false);
    };
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}

// Text shown by the mobile simulator when approval fails.
fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Upstream {
            message: Some(message),
            ..
        } if !message.is_empty() => message.clone(),
        ApiError::Upstream { status, .. } => format!("HTTP {status}"),
        other => other.to_string(),
    }
}
