use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::domain::entities::{AccessSession, QrAuthStatus, QrSession};
use crate::domain::ports::{AccessTokenStore, Clock, QrSessionStore};

// Lifetimes applied by the handlers, in seconds.
#[derive(Clone, Copy, Debug)]
pub struct Ttls {
    pub qr_session_seconds: u64,
    pub access_token_seconds: u64,
}

// Application state holding QR sessions and issued bearer tokens.
#[derive(Clone)]
pub struct AppState {
    pub qr_sessions: Arc<Mutex<HashMap<String, QrSession>>>,
    pub access_tokens: Arc<Mutex<HashMap<String, AccessSession>>>,
    pub ttls: Ttls,
}

impl AppState {
    pub fn new(ttls: Ttls) -> Self {
        Self {
            qr_sessions: Arc::new(Mutex::new(HashMap::new())),
            access_tokens: Arc::new(Mutex::new(HashMap::new())),
            ttls,
        }
    }

    pub fn qr_store(&self) -> InMemoryQrSessionStore {
        InMemoryQrSessionStore {
            sessions: self.qr_sessions.clone(),
        }
    }

    pub fn token_store(&self) -> InMemoryAccessTokenStore {
        InMemoryAccessTokenStore {
            tokens: self.access_tokens.clone(),
        }
    }

    // Drops QR sessions and tokens whose expiry has passed. Reads already
    // treat them as absent; this keeps unread ones from piling up.
    // Returns how many sessions and tokens were removed.
    pub async fn evict_expired(&self, now: u64) -> (usize, usize) {
        let sessions = {
            let mut sessions = self.qr_sessions.lock().await;
            let before = sessions.len();
            sessions.retain(|_, session| session.expires_at > now);
            before - sessions.len()
        };
        let tokens = {
            let mut tokens = self.access_tokens.lock().await;
            let before = tokens.len();
            tokens.retain(|_, session| session.expires_at > now);
            before - tokens.len()
        };
        (sessions, tokens)
    }
}

// In-memory QR session store adapter.
#[derive(Clone)]
pub struct InMemoryQrSessionStore {
    pub sessions: Arc<Mutex<HashMap<String, QrSession>>>,
}

#[async_trait]
impl QrSessionStore for InMemoryQrSessionStore {
    async fn put(&self, session_id: String, session: QrSession) -> Result<(), String> {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id, session);
        Ok(())
    }

    async fn replace_pending(&self, session_id: &str, session: QrSession) -> Result<bool, String> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(session_id) {
            Some(current) if current.status == QrAuthStatus::Pending => {
                *current = session;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get(&self, session_id: &str) -> Result<Option<QrSession>, String> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn remove(&self, session_id: &str) -> Result<bool, String> {
        let mut sessions = self.sessions.lock().await;
        Ok(sessions.remove(session_id).is_some())
    }
}

// In-memory bearer token store adapter.
#[derive(Clone)]
pub struct InMemoryAccessTokenStore {
    pub tokens: Arc<Mutex<HashMap<String, AccessSession>>>,
}

#[async_trait]
impl AccessTokenStore for InMemoryAccessTokenStore {
    async fn insert(&self, token: String, session: AccessSession) -> Result<(), String> {
        let mut tokens = self.tokens.lock().await;
        tokens.insert(token, session);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<AccessSession>, String> {
        let tokens = self.tokens.lock().await;
        Ok(tokens.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        let mut tokens = self.tokens.lock().await;
        Ok(tokens.remove(token).is_some())
    }
}

// System clock adapter used by the use cases.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn state() -> AppState {
        AppState::new(Ttls {
            qr_session_seconds: 300,
            access_token_seconds: 3600,
        })
    }

    fn access_session(expires_at: u64) -> AccessSession {
        AccessSession {
            user_id: "viewer@example.com".to_string(),
            display_name: "Movie Fan".to_string(),
            session_id: "mobile-session".to_string(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn when_entries_have_expired_then_eviction_removes_only_those() {
        let state = state();
        {
            let mut sessions = state.qr_sessions.lock().await;
            sessions.insert("stale".to_string(), QrSession::pending(NOW - 1));
            sessions.insert("edge".to_string(), QrSession::pending(NOW));
            sessions.insert("live".to_string(), QrSession::pending(NOW + 1));
        }
        {
            let mut tokens = state.access_tokens.lock().await;
            tokens.insert("old-token".to_string(), access_session(NOW));
            tokens.insert("live-token".to_string(), access_session(NOW + 60));
        }

        let evicted = state.evict_expired(NOW).await;

        assert_eq!(evicted, (2, 1));
        let sessions = state.qr_sessions.lock().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key("live"));
        let tokens = state.access_tokens.lock().await;
        assert_eq!(tokens.len(), 1);
        assert!(tokens.contains_key("live-token"));
    }

    #[tokio::test]
    async fn when_nothing_has_expired_then_eviction_is_a_no_op() {
        let state = state();
        state
            .qr_sessions
            .lock()
            .await
            .insert("live".to_string(), QrSession::pending(NOW + 300));

        assert_eq!(state.evict_expired(NOW).await, (0, 0));
        assert_eq!(state.qr_sessions.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn when_session_is_pending_then_replace_pending_swaps_it_once() {
        let store = state().qr_store();
        store
            .put("abc123".to_string(), QrSession::pending(NOW + 10))
            .await
            .expect("expected put to succeed");
        let approved = QrSession {
            status: QrAuthStatus::Authenticated,
            user_id: Some("viewer@example.com".to_string()),
            web_token: Some("tok".to_string()),
            expires_at: NOW + 300,
        };

        let first = store
            .replace_pending("abc123", approved.clone())
            .await
            .expect("expected replace to succeed");
        let second = store
            .replace_pending(
                "abc123",
                QrSession {
                    web_token: Some("other".to_string()),
                    ..approved.clone()
                },
            )
            .await
            .expect("expected replace to succeed");

        assert!(first);
        assert!(!second);
        let saved = store.get("abc123").await.expect("expected get to succeed");
        assert_eq!(saved, Some(approved));
    }

    #[tokio::test]
    async fn when_session_is_missing_then_replace_pending_writes_nothing() {
        let store = state().qr_store();

        let replaced = store
            .replace_pending("missing", QrSession::pending(NOW + 10))
            .await
            .expect("expected replace to succeed");

        assert!(!replaced);
        assert_eq!(store.get("missing").await.expect("expected get"), None);
    }
}
