// QR login session poller: creates a session, polls its status on a fixed
// interval, and hands the issued token off exactly once.

use crate::domain::{LoginError, LoginState, QrAuthApi, QrStatus, SessionHandoff};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Tunables for the polling loop.
#[derive(Debug, Clone, Copy)]
pub struct PollerSettings {
    /// Delay between status polls; the first poll fires one interval after
    /// the session is created.
    pub interval: Duration,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
        }
    }
}

/// Result of a single status poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Session is still pending; keep polling.
    Continue,
    /// A terminal state was reached and published.
    Finished,
    /// The session is no longer tracked; the response was discarded.
    Stale,
}

// Session currently owned by the poller. `generation` bumps on every start
// and cancel so late responses from an old attempt can be recognised.
#[derive(Default)]
struct Tracked {
    generation: u64,
    session_id: Option<String>,
}

struct Shared<A, H> {
    api: A,
    handoff: H,
    interval: Duration,
    tracked: Mutex<Tracked>,
    state_tx: watch::Sender<LoginState>,
}

/// Drives one QR login widget. At most one polling timer is alive per
/// instance; starting a new session always replaces the previous one.
pub struct QrLoginPoller<A, H> {
    shared: Arc<Shared<A, H>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<A, H> QrLoginPoller<A, H>
where
    A: QrAuthApi + 'static,
    H: SessionHandoff + 'static,
{
    /// A zero interval falls back to the default, since the timer needs a
    /// non-zero period.
    pub fn new(api: A, handoff: H, settings: PollerSettings) -> Self {
        let interval = if settings.interval.is_zero() {
            warn!("zero qr poll interval requested; using the default");
            PollerSettings::default().interval
        } else {
            settings.interval
        };
        let (state_tx, _state_rx) = watch::channel(LoginState::Idle);
        Self {
            shared: Arc::new(Shared {
                api,
                handoff,
                interval,
                tracked: Mutex::new(Tracked::default()),
                state_tx,
            }),
            timer: Mutex::new(None),
        }
    }

    /// Current local state.
    pub fn state(&self) -> LoginState {
        self.shared.state_tx.borrow().clone()
    }

    /// Watch channel of state transitions.
    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.shared.state_tx.subscribe()
    }

    /// Session id being polled, if any.
    pub fn session_id(&self) -> Option<String> {
        self.shared.lock().session_id.clone()
    }

    /// Whether a polling timer is currently scheduled.
    pub fn is_polling(&self) -> bool {
        lock(&self.timer)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Requests a fresh session from the backend and starts polling it.
    ///
    /// Any previous session and its timer are discarded first. Session
    /// creation is never retried automatically; on failure the state moves
    /// to `Error` and no timer is started.
    pub async fn start_session(&self) -> Result<String, LoginError> {
        let generation = {
            let mut timer = lock(&self.timer);
            if let Some(handle) = timer.take() {
                handle.abort();
            }
            let mut tracked = self.shared.lock();
            tracked.generation += 1;
            tracked.session_id = None;
            self.shared.state_tx.send_replace(LoginState::Loading);
            tracked.generation
        };

        info!(generation, "requesting qr login session");
        let created = match self.shared.api.create_session().await {
            Ok(created) => created,
            Err(err) => {
                warn!(error = %err, "failed to create qr login session");
                self.shared.transition(
                    generation,
                    LoginState::Error {
                        message: format!("Could not create a QR login session ({err})."),
                    },
                );
                return Err(LoginError::CreateSession(err));
            }
        };

        let session_id = created.session_id;
        let mut timer = lock(&self.timer);
        {
            let mut tracked = self.shared.lock();
            if tracked.generation != generation {
                debug!(%session_id, "discarding session created for a superseded attempt");
                return Err(LoginError::Cancelled);
            }
            tracked.session_id = Some(session_id.clone());
            self.shared.state_tx.send_replace(LoginState::Pending {
                session_id: session_id.clone(),
            });
        }

        info!(%session_id, "qr login session pending");
        let handle = tokio::spawn(poll_loop(
            Arc::clone(&self.shared),
            generation,
            session_id.clone(),
        ));
        if let Some(previous) = timer.replace(handle) {
            previous.abort();
        }

        Ok(session_id)
    }

    /// Polls the given session once. Responses for anything other than the
    /// tracked session are discarded.
    pub async fn poll(&self, session_id: &str) -> PollOutcome {
        let generation = {
            let tracked = self.shared.lock();
            if tracked.session_id.as_deref() != Some(session_id) {
                return PollOutcome::Stale;
            }
            tracked.generation
        };

        let outcome = self.shared.poll(generation, session_id).await;
        if outcome == PollOutcome::Finished {
            self.stop_timer();
        }
        outcome
    }

    /// Stops the timer and discards the session. Safe to call repeatedly or
    /// when nothing is running. An in-flight attempt returns to `Idle`;
    /// terminal states are left for the user to read.
    pub fn cancel(&self) {
        let mut timer = lock(&self.timer);
        if let Some(handle) = timer.take() {
            handle.abort();
        }

        let mut tracked = self.shared.lock();
        tracked.generation += 1;
        if let Some(session_id) = tracked.session_id.take() {
            info!(%session_id, "qr login session cancelled");
        }
        self.shared.state_tx.send_if_modified(|state| {
            if matches!(state, LoginState::Loading | LoginState::Pending { .. }) {
                *state = LoginState::Idle;
                true
            } else {
                false
            }
        });
    }

    fn stop_timer(&self) {
        if let Some(handle) = lock(&self.timer).take() {
            handle.abort();
        }
    }
}

impl<A, H> Drop for QrLoginPoller<A, H> {
    fn drop(&mut self) {
        let timer = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }
}

impl<A, H> Shared<A, H>
where
    A: QrAuthApi,
    H: SessionHandoff,
{
    fn lock(&self) -> MutexGuard<'_, Tracked> {
        lock(&self.tracked)
    }

    fn tracks(&self, generation: u64, session_id: &str) -> bool {
        let tracked = self.lock();
        tracked.generation == generation && tracked.session_id.as_deref() == Some(session_id)
    }

    // Publishes `state` only if the attempt is still current.
    fn transition(&self, generation: u64, state: LoginState) -> bool {
        let tracked = self.lock();
        if tracked.generation != generation {
            return false;
        }
        self.state_tx.send_replace(state);
        true
    }

    // Releases the session id so no other poll can act on it. Only the
    // caller that gets `true` may publish a terminal state.
    fn claim(&self, generation: u64, session_id: &str) -> bool {
        let mut tracked = self.lock();
        if tracked.generation != generation || tracked.session_id.as_deref() != Some(session_id) {
            return false;
        }
        tracked.session_id = None;
        true
    }

    fn finish(&self, generation: u64, session_id: &str, state: LoginState) -> PollOutcome {
        if !self.claim(generation, session_id) {
            return PollOutcome::Stale;
        }
        self.transition(generation, state);
        PollOutcome::Finished
    }

    async fn poll(&self, generation: u64, session_id: &str) -> PollOutcome {
        if !self.tracks(generation, session_id) {
            return PollOutcome::Stale;
        }

        let status = match self.api.session_status(session_id).await {
            Ok(status) => status,
            Err(err) => {
                // Fail fast: one broken poll ends the loop.
                warn!(%session_id, error = %err, "qr status poll failed");
                return self.finish(
                    generation,
                    session_id,
                    LoginState::Error {
                        message: format!("Lost contact with the login service ({err})."),
                    },
                );
            }
        };

        // A reply for some other session says nothing about ours; keep
        // polling while the attempt is still current.
        if status.session_id != session_id {
            debug!(
                %session_id,
                reported = %status.session_id,
                "discarding status for another session"
            );
            return if self.tracks(generation, session_id) {
                PollOutcome::Continue
            } else {
                PollOutcome::Stale
            };
        }

        debug!(%session_id, status = %status.status, "qr status polled");
        match status.status {
            QrStatus::Pending => {
                if self.tracks(generation, session_id) {
                    PollOutcome::Continue
                } else {
                    PollOutcome::Stale
                }
            }
            QrStatus::Failed => self.finish(generation, session_id, LoginState::failed()),
            QrStatus::Expired => self.finish(generation, session_id, LoginState::expired()),
            QrStatus::Authenticated => self.complete(generation, session_id, status.token).await,
        }
    }

    async fn complete(&self, generation: u64, session_id: &str, token: Option<String>) -> PollOutcome {
        let Some(token) = token else {
            warn!(%session_id, "qr session authenticated without a token");
            return self.finish(
                generation,
                session_id,
                LoginState::Error {
                    message: "The login service approved the session but sent no credential."
                        .to_string(),
                },
            );
        };

        if !self.claim(generation, session_id) {
            return PollOutcome::Stale;
        }

        let state = match self.handoff.establish(&token).await {
            Ok(()) => {
                info!(%session_id, "qr login completed");
                LoginState::Authenticated {
                    session_id: session_id.to_string(),
                }
            }
            Err(err) => {
                warn!(%session_id, error = %err, "session handoff failed");
                LoginState::Error {
                    message: format!("Signed in, but the session could not be established ({err})."),
                }
            }
        };
        self.transition(generation, state);
        PollOutcome::Finished
    }
}

async fn poll_loop<A, H>(shared: Arc<Shared<A, H>>, generation: u64, session_id: String)
where
    A: QrAuthApi,
    H: SessionHandoff,
{
    let mut ticker = time::interval_at(Instant::now() + shared.interval, shared.interval);
    // A slow poll pushes the next one back instead of bursting.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if shared.poll(generation, &session_id).await != PollOutcome::Continue {
            break;
        }
    }
    debug!(%session_id, generation, "qr poll loop stopped");
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
