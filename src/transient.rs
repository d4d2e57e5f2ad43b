//! Short-lived UI indicators ("searching...", "added to cart").
//!
//! A [`TransientFlag`] is raised for a fixed duration. Raising it again before it
//! expires cancels the pending reset and starts a new one, which gives the
//! debounce behaviour of the search indicator for free.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

#[derive(Debug, Default)]
struct FlagState {
    raised: bool,
    /// Bumped on every raise and clear; a reset only applies to its own raise.
    token: u64,
    reset: Option<JoinHandle<()>>,
}

/// A boolean that switches itself off after `duration`.
#[derive(Debug, Clone)]
pub struct TransientFlag {
    name: &'static str,
    duration: Duration,
    state: Arc<Mutex<FlagState>>,
}

impl TransientFlag {
    pub fn new(name: &'static str, duration: Duration) -> Self {
        Self {
            name,
            duration,
            state: Arc::new(Mutex::new(FlagState::default())),
        }
    }

    /// Raises the flag and (re)schedules its reset. Must be called inside a tokio
    /// runtime.
    pub fn raise(&self) {
        let mut state = self.lock();
        if let Some(pending) = state.reset.take() {
            pending.abort();
        }
        state.token = state.token.wrapping_add(1);
        state.raised = true;

        let token = state.token;
        let shared = Arc::clone(&self.state);
        let duration = self.duration;
        let name = self.name;
        state.reset = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut state = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if state.token == token {
                state.raised = false;
                state.reset = None;
                trace!(flag = name, "Expired");
            }
        }));
        trace!(flag = self.name, ?duration, "Raised");
    }

    /// Lowers the flag now and cancels any pending reset.
    pub fn clear(&self) {
        let mut state = self.lock();
        if let Some(pending) = state.reset.take() {
            pending.abort();
        }
        state.token = state.token.wrapping_add(1);
        state.raised = false;
    }

    pub fn is_raised(&self) -> bool {
        self.lock().raised
    }

    fn lock(&self) -> MutexGuard<'_, FlagState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
