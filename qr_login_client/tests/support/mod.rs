// Shared primitives for booting the QR auth server in integration tests.
use async_trait::async_trait;
use qr_auth_server::Ttls;
use qr_login_client::domain::{HandoffError, LoginState, SessionHandoff};
use std::{
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};
use tokio::sync::watch;

// Base URL of the shared server used by tests that don't need custom TTLs.
static SERVER_URL: OnceLock<String> = OnceLock::new();

// Ensure the shared test server is running and return its `/api` base URL.
pub fn ensure_server() -> &'static str {
    SERVER_URL
        .get_or_init(|| {
            spawn_server(Ttls {
                qr_session_seconds: 300,
                access_token_seconds: 3600,
            })
        })
        .as_str()
}

// Start a dedicated server with the given TTLs and return its `/api` base URL.
pub fn spawn_server(ttls: Ttls) -> String {
    // Local one-time slot where the server thread publishes its selected address.
    let published_addr = Arc::new(OnceLock::<String>::new());
    let published_addr_thread = Arc::clone(&published_addr);

    // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("test runtime");
        runtime.block_on(async move {
            // Bind to an ephemeral port to avoid collisions with local services.
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind ephemeral test port");
            let addr = listener.local_addr().expect("get local addr");
            let _ = published_addr_thread.set(addr.to_string());
            qr_auth_server::run(listener, ttls)
                .await
                .expect("server failed");
        });
    });

    let addr = wait_for_readiness(published_addr);
    format!("http://{addr}/api")
}

// Wait for address publication, then for the socket to accept connections.
fn wait_for_readiness(published_addr: Arc<OnceLock<String>>) -> String {
    let addr = loop {
        if let Some(addr) = published_addr.get() {
            break addr.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        if std::net::TcpStream::connect(&addr).is_ok() {
            return addr;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

// Wait until the poller publishes a terminal state.
pub async fn wait_for_terminal(mut states: watch::Receiver<LoginState>) -> LoginState {
    tokio::time::timeout(Duration::from_secs(10), states.wait_for(LoginState::is_terminal))
        .await
        .expect("poller should reach a terminal state in time")
        .expect("poller state channel should stay open")
        .clone()
}

// Handoff that records tokens for assertions.
#[derive(Clone, Default)]
pub struct RecordingHandoff {
    tokens: Arc<Mutex<Vec<String>>>,
}

impl RecordingHandoff {
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().expect("tokens mutex poisoned").clone()
    }
}

#[async_trait]
impl SessionHandoff for RecordingHandoff {
    async fn establish(&self, token: &str) -> Result<(), HandoffError> {
        self.tokens
            .lock()
            .expect("tokens mutex poisoned")
            .push(token.to_string());
        Ok(())
    }
}
