use crate::domain::{HandoffError, SessionHandoff};
use async_trait::async_trait;
use std::path::PathBuf;

// Establishes the CLI's session by persisting the bearer token, the way the
// browser keeps it under `accessToken`. Without a path the token is printed.
#[derive(Clone, Debug)]
pub struct TokenHandoff {
    path: Option<PathBuf>,
}

impl TokenHandoff {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SessionHandoff for TokenHandoff {
    async fn establish(&self, token: &str) -> Result<(), HandoffError> {
        match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(path, token).await?;
                tracing::info!(path = %path.display(), "access token stored");
            }
            None => println!("access token: {token}"),
        }
        Ok(())
    }
}
