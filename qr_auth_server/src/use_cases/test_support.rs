use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::{AccessSession, QrAuthStatus, QrSession};
use crate::domain::ports::{AccessTokenStore, Clock, QrSessionStore};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub get: bool,
    pub remove: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingTokenStore {
    tokens: Arc<Mutex<HashMap<String, AccessSession>>>,
    failures: FailureFlags,
}

impl RecordingTokenStore {
    pub(crate) fn new() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_session(&self, token: impl Into<String>, session: AccessSession) {
        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.insert(token.into(), session);
    }

    pub(crate) fn get_test_session(&self, token: &str) -> Option<AccessSession> {
        let guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.get(token).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.lock().expect("tokens mutex poisoned").len()
    }
}

#[async_trait]
impl AccessTokenStore for RecordingTokenStore {
    async fn insert(&self, token: String, session: AccessSession) -> Result<(), String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.insert(token, session);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<AccessSession>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.tokens.lock().expect("tokens mutex poisoned");
        Ok(guard.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        Ok(guard.remove(token).is_some())
    }
}

#[derive(Clone)]
pub(crate) struct RecordingQrStore {
    sessions: Arc<Mutex<HashMap<String, QrSession>>>,
    failures: FailureFlags,
    // Another approval lands between the use case's read and its write.
    race_on_replace: Option<QrAuthStatus>,
}

impl RecordingQrStore {
    pub(crate) fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
            race_on_replace: None,
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn racing_to(mut self, status: QrAuthStatus) -> Self {
        self.race_on_replace = Some(status);
        self
    }

    pub(crate) fn insert_test_session(&self, session_id: impl Into<String>, session: QrSession) {
        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(session_id.into(), session);
    }

    pub(crate) fn get_test_session(&self, session_id: &str) -> Option<QrSession> {
        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.get(session_id).cloned()
    }
}

#[async_trait]
impl QrSessionStore for RecordingQrStore {
    async fn put(&self, session_id: String, session: QrSession) -> Result<(), String> {
        if self.failures.insert {
            return Err("put failed".to_string());
        }

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(session_id, session);
        Ok(())
    }

    async fn replace_pending(&self, session_id: &str, session: QrSession) -> Result<bool, String> {
        if self.failures.insert {
            return Err("replace failed".to_string());
        }

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        if let (Some(status), Some(current)) = (self.race_on_replace, guard.get_mut(session_id)) {
            current.status = status;
        }
        match guard.get_mut(session_id) {
            Some(current) if current.status == QrAuthStatus::Pending => {
                *current = session;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get(&self, session_id: &str) -> Result<Option<QrSession>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.get(session_id).cloned())
    }

    async fn remove(&self, session_id: &str) -> Result<bool, String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.remove(session_id).is_some())
    }
}
