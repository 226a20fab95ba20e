use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use shared::{domain::Dog, error::DiscoveryError};
use tokio::sync::{broadcast, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{ban_set::BanSet, provider::DogProvider};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    /// Fetches allowed per `discover` call before giving up on banned candidates.
    pub max_attempts: u32,
    /// Wall-clock budget for one `discover` call, provider latency included.
    pub timeout: Option<Duration>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    LoadingChanged(bool),
    CandidateRejected { attempt: u32, banned_value: String },
    DogCommitted(Dog),
    BanListChanged(Vec<String>),
    DiscoveryFailed(String),
}

/// Read-only copy of the session for renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_dog: Option<Dog>,
    pub banned: Vec<String>,
    pub history: Vec<Dog>,
    pub loading: bool,
}

#[derive(Default)]
struct SessionState {
    current_dog: Option<Dog>,
    ban_set: BanSet,
    history: Vec<Dog>,
    loading: bool,
}

pub struct SessionController {
    provider: Arc<dyn DogProvider>,
    settings: DiscoverySettings,
    inner: Mutex<SessionState>,
    discovery_guard: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionController {
    pub fn new(provider: Arc<dyn DogProvider>, settings: DiscoverySettings) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            provider,
            settings,
            inner: Mutex::new(SessionState::default()),
            discovery_guard: Mutex::new(()),
            events,
        })
    }

    /// Builds a controller and runs the first discovery. A failed first
    /// discovery leaves the session empty but usable.
    pub async fn start(provider: Arc<dyn DogProvider>, settings: DiscoverySettings) -> Arc<Self> {
        Self::start_with_cancel(provider, settings, &CancellationToken::new()).await
    }

    /// Like [`SessionController::start`], but the first discovery stops when
    /// `cancel` fires.
    pub async fn start_with_cancel(
        provider: Arc<dyn DogProvider>,
        settings: DiscoverySettings,
        cancel: &CancellationToken,
    ) -> Arc<Self> {
        let controller = Self::new(provider, settings);
        if let Err(error) = controller.discover_with_cancel(cancel).await {
            debug!(%error, "initial discovery did not commit a dog");
        }
        controller
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn discover(&self) -> Result<Dog, DiscoveryError> {
        self.discover_with_cancel(&CancellationToken::new()).await
    }

    /// Fetches candidates until one clears the ban list, the attempt cap is
    /// hit, the time budget runs out, or `cancel` fires. Provider errors end
    /// the call immediately without touching the current dog or history.
    pub async fn discover_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Dog, DiscoveryError> {
        let Ok(_guard) = self.discovery_guard.try_lock() else {
            debug!("rejecting overlapping discovery");
            return Err(DiscoveryError::AlreadyInProgress);
        };

        self.set_loading(true).await;
        let started = Instant::now();
        let outcome = match self.settings.timeout {
            Some(budget) => tokio::time::timeout(budget, self.run_discovery(cancel))
                .await
                .unwrap_or_else(|_| {
                    Err(DiscoveryError::Timeout {
                        elapsed: started.elapsed(),
                    })
                }),
            None => self.run_discovery(cancel).await,
        };
        self.set_loading(false).await;

        match &outcome {
            Ok(dog) => info!(
                breed = dog.breed(),
                size = %dog.size(),
                origin = %dog.origin(),
                lifespan = %dog.lifespan(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "discovered dog"
            ),
            Err(error) => {
                warn!(%error, "dog discovery failed");
                let _ = self
                    .events
                    .send(SessionEvent::DiscoveryFailed(error.to_string()));
            }
        }
        outcome
    }

    async fn run_discovery(&self, cancel: &CancellationToken) -> Result<Dog, DiscoveryError> {
        let max_attempts = self.settings.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            let candidate = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(DiscoveryError::Cancelled),
                fetched = self.provider.fetch_candidate() => fetched?,
            };

            // Ban check and commit share one lock so a concurrent ban cannot slip in between.
            let mut state = self.inner.lock().await;
            if let Some(banned_value) = state.ban_set.first_banned(&candidate) {
                debug!(
                    attempt,
                    breed = candidate.breed(),
                    banned_value,
                    "discarding banned candidate"
                );
                let _ = self.events.send(SessionEvent::CandidateRejected {
                    attempt,
                    banned_value: banned_value.to_string(),
                });
                continue;
            }

            state.current_dog = Some(candidate.clone());
            state.history.push(candidate.clone());
            let _ = self
                .events
                .send(SessionEvent::DogCommitted(candidate.clone()));
            return Ok(candidate);
        }

        Err(DiscoveryError::Exhausted {
            attempts: max_attempts,
        })
    }

    async fn set_loading(&self, loading: bool) {
        self.inner.lock().await.loading = loading;
        let _ = self.events.send(SessionEvent::LoadingChanged(loading));
    }

    /// Adds `value` to the ban list. Returns `false` if it was already banned
    /// or blank. The current dog and history are left as they are.
    pub async fn ban_attribute(&self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        let mut state = self.inner.lock().await;
        if !state.ban_set.insert(value) {
            return false;
        }
        info!(value, banned = state.ban_set.len(), "banned attribute");
        let _ = self
            .events
            .send(SessionEvent::BanListChanged(state.ban_set.to_vec()));
        true
    }

    /// Removes `value` from the ban list. Returns `false` if it was not banned.
    pub async fn unban_attribute(&self, value: &str) -> bool {
        let mut state = self.inner.lock().await;
        if !state.ban_set.remove(value.trim()) {
            return false;
        }
        info!(value = value.trim(), banned = state.ban_set.len(), "unbanned attribute");
        let _ = self
            .events
            .send(SessionEvent::BanListChanged(state.ban_set.to_vec()));
        true
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.lock().await;
        SessionSnapshot {
            current_dog: state.current_dog.clone(),
            banned: state.ban_set.to_vec(),
            history: state.history.clone(),
            loading: state.loading,
        }
    }

    pub async fn current_dog(&self) -> Option<Dog> {
        self.inner.lock().await.current_dog.clone()
    }

    pub async fn history(&self) -> Vec<Dog> {
        self.inner.lock().await.history.clone()
    }

    pub async fn banned(&self) -> Vec<String> {
        self.inner.lock().await.ban_set.to_vec()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.loading
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
