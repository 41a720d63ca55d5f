use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    ApiError, HandoffError, QrAuthApi, QrStatus, SessionCreated, SessionHandoff, SessionStatus,
};

pub(crate) fn status(session_id: &str, status: QrStatus, token: Option<&str>) -> SessionStatus {
    SessionStatus {
        session_id: session_id.to_string(),
        status,
        token: token.map(str::to_string),
        message: format!("Current status: {status}"),
    }
}

#[derive(Default)]
struct Script {
    next_session_id: String,
    create_error: Option<ApiError>,
    creation_delay: Option<Duration>,
    // Scripted poll results; an empty queue answers PENDING.
    polls: VecDeque<Result<SessionStatus, ApiError>>,
    polled_ids: Vec<String>,
    create_count: usize,
}

// Fake backend that replays scripted responses and records every call.
#[derive(Clone)]
pub(crate) struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    pub(crate) fn new(session_id: &str) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                next_session_id: session_id.to_string(),
                ..Default::default()
            })),
        }
    }

    pub(crate) fn with_statuses(self, statuses: impl IntoIterator<Item = SessionStatus>) -> Self {
        self.with_poll_results(statuses.into_iter().map(Ok))
    }

    pub(crate) fn with_poll_results(
        self,
        results: impl IntoIterator<Item = Result<SessionStatus, ApiError>>,
    ) -> Self {
        self.script().polls.extend(results);
        self
    }

    pub(crate) fn failing_creation(self, error: ApiError) -> Self {
        self.script().create_error = Some(error);
        self
    }

    pub(crate) fn with_creation_delay(self, delay: Duration) -> Self {
        self.script().creation_delay = Some(delay);
        self
    }

    pub(crate) fn set_next_session_id(&self, session_id: &str) {
        self.script().next_session_id = session_id.to_string();
    }

    pub(crate) fn push_status(&self, status: SessionStatus) {
        self.script().polls.push_back(Ok(status));
    }

    pub(crate) fn poll_count(&self) -> usize {
        self.script().polled_ids.len()
    }

    pub(crate) fn polled_ids(&self) -> Vec<String> {
        self.script().polled_ids.clone()
    }

    pub(crate) fn create_count(&self) -> usize {
        self.script().create_count
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("script mutex poisoned")
    }
}

#[async_trait]
impl QrAuthApi for ScriptedApi {
    async fn create_session(&self) -> Result<SessionCreated, ApiError> {
        let delay = {
            let mut script = self.script();
            script.create_count += 1;
            script.creation_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let script = self.script();
        if let Some(error) = script.create_error.clone() {
            return Err(error);
        }
        Ok(SessionCreated {
            session_id: script.next_session_id.clone(),
            message: "QR session created.".to_string(),
        })
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus, ApiError> {
        let mut script = self.script();
        script.polled_ids.push(session_id.to_string());
        script
            .polls
            .pop_front()
            .unwrap_or_else(|| Ok(status(session_id, QrStatus::Pending, None)))
    }
}

// Handoff that records every token it receives.
#[derive(Clone)]
pub(crate) struct RecordingHandoff {
    tokens: Arc<Mutex<Vec<String>>>,
    should_fail: bool,
}

impl RecordingHandoff {
    pub(crate) fn new() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub(crate) fn tokens(&self) -> Vec<String> {
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
        if self.should_fail {
            return Err("token store unavailable".into());
        }
        Ok(())
    }
}
