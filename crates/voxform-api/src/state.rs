//! Application state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, MutexGuard};
use voxform_config::Config;
use voxform_core::{FormSession, SessionOptions};

use crate::agent::VoiceAgent;
use crate::error::ApiError;

/// State shared across handlers.
pub struct AppState {
    pub config: Config,
    pub agent: Arc<VoiceAgent>,
    /// The one active form. Replaced by every upload.
    session: Mutex<Option<FormSession>>,
    start_time: Instant,
    request_count: AtomicU64,
}

impl AppState {
    pub fn new(config: Config, agent: VoiceAgent) -> Self {
        Self {
            config,
            agent: Arc::new(agent),
            session: Mutex::new(None),
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    /// Options every new session is created with.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            confidence_threshold: self.config.voice.confidence_threshold,
            prompt: self.config.voice.prompt.clone(),
            voice_available: true,
        }
    }

    /// Lock the session slot, loaded or not.
    pub async fn slot(&self) -> MutexGuard<'_, Option<FormSession>> {
        self.session.lock().await
    }

    /// Run `f` against the loaded session under the lock.
    pub async fn with_session<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut FormSession) -> Result<T, ApiError>,
    {
        let mut slot = self.session.lock().await;
        let session = slot.as_mut().ok_or(ApiError::NoSession)?;
        f(session)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub fn increment_requests(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default(), VoiceAgent::new(None))
    }
}
