use clap::{Parser, Subcommand};

/// Cross-device QR login for the movie booking web client.
#[derive(Debug, Parser)]
#[command(name = "qr-login", version)]
pub struct Cli {
    /// Backend base URL; overrides QR_AUTH_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a QR code and wait for a mobile device to approve it (default).
    Login {
        /// Poll interval in milliseconds; overrides QR_POLL_INTERVAL_MS.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Obtain a mobile auth token to approve QR sessions with.
    MobileLogin {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        display_name: String,
    },
    /// Act as the mobile device and approve a scanned session.
    Simulate {
        #[arg(long)]
        session_id: String,
        #[arg(long)]
        mobile_token: String,
    },
    /// Check which user a bearer token belongs to.
    Verify {
        #[arg(long)]
        token: String,
    },
}
