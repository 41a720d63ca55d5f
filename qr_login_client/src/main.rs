use clap::Parser;
use qr_login_client::frameworks::{app, cli::Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    app::init_runtime();
    let cli = Cli::parse();

    // Report failures through tracing rather than panicking.
    match app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "qr-login failed");
            ExitCode::FAILURE
        }
    }
}
