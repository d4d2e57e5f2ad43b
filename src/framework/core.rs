//! # Core Store Framework
//!
//! This module defines the generic building blocks every store is made of.
//!
//! ## Key Types
//!
//! - [`StoreState`]: The trait that all store states must implement.
//! - [`StoreActor`]: The generic task that owns one state and applies commands to it.
//! - [`StoreClient`]: The generic client for communicating with a store.
//! - [`StateHook`]: Observer notified after every state-changing command.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, Rejected).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (State, Commands, Queries, Hooks)
// =============================================================================

/// How a successful command affected the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing observable changed; hooks are not called.
    Unchanged,
    /// The state changed and its snapshot should be written.
    Modified,
    /// The state was reset and its snapshot should be erased.
    Erased,
}

/// Trait that any state must implement to be managed by a [`StoreActor`].
///
/// # Architecture Note
/// A store owns a whole collection (the catalog, the cart) rather than one entity,
/// because its operations depend on order and on the other members (prepend, merge
/// by identity, replace-all). The actor applies commands one at a time, so `apply`
/// is a plain synchronous function over `&mut self`.
///
/// Associated types keep every store type-safe: a `CartCommand` cannot be sent to
/// the catalog, and a catalog query answers with a catalog view.
pub trait StoreState: Send + Sync + 'static {
    /// Short name used in logs (e.g. `"catalog"`).
    const NAME: &'static str;

    /// Mutation requests understood by this store.
    type Command: Send + Sync + Debug;

    /// Result returned by a successful command.
    type Outcome: Send + Sync + Debug;

    /// Read-only requests; answered from the current state, never stored.
    type Query: Send + Sync + Debug;

    /// Answer to a query.
    type View: Send + Sync + Debug;

    /// What gets persisted: the whole state, overwritten on every change.
    type Snapshot: Serialize + DeserializeOwned + Send + Sync;

    /// Domain error returned when a command is rejected.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Rebuilds the state from a persisted snapshot, or the initial state when
    /// nothing usable was found.
    fn restore(snapshot: Option<Self::Snapshot>) -> Self;

    fn snapshot(&self) -> Self::Snapshot;

    fn apply(&mut self, command: Self::Command) -> Result<Self::Outcome, Self::Error>;

    fn read(&self, query: Self::Query) -> Self::View;

    /// Number of records held, for logging.
    fn size(&self) -> usize;

    /// Classifies an outcome. The default treats every command as a modification.
    fn classify(_outcome: &Self::Outcome) -> Change {
        Change::Modified
    }
}

/// Observer called by the actor after a command changed the state.
///
/// Hooks run inside the store task before the caller gets its response, so once
/// a client call returns, every hook has seen the new state.
#[async_trait]
pub trait StateHook<S: StoreState>: Send + Sync {
    async fn on_change(&self, state: &S, change: Change);
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the store framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store closed")]
    ActorClosed,
    #[error("Store dropped response channel")]
    ActorDropped,
    #[error("Command rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the store's own error type from a rejection, or wraps anything
    /// else with `fallback`.
    pub fn into_domain<E>(self, fallback: impl FnOnce(String) -> E) -> E
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::Rejected(source) => match source.downcast::<E>() {
                Ok(domain) => *domain,
                Err(other) => fallback(other.to_string()),
            },
            other => fallback(other.to_string()),
        }
    }
}

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to a store.
///
/// Every interaction is either a command (may change the state, may be rejected)
/// or a query (read-only, always answered).
#[derive(Debug)]
pub enum StoreRequest<S: StoreState> {
    Apply {
        command: S::Command,
        respond_to: Response<S::Outcome>,
    },
    Read {
        query: S::Query,
        respond_to: Response<S::View>,
    },
}

// =============================================================================
// 3. THE GENERIC STORE TASK
// =============================================================================

/// The generic actor that owns one store state.
///
/// **Concurrency Model**:
/// The actor processes its messages *sequentially* in a loop, so the state needs
/// no `Mutex`. A command is applied, its hooks run, and only then is the next
/// message taken.
pub struct StoreActor<S: StoreState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
}

impl<S: StoreState> StoreActor<S> {
    /// Creates the actor around an already restored state, plus its client.
    pub fn new(buffer_size: usize, state: S) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, state };
        (actor, StoreClient::new(sender))
    }

    /// Runs the store's event loop until every client is dropped.
    ///
    /// # Hook Injection
    /// Hooks are injected here rather than in `new()`, so the same store can be
    /// wired to a file backend in the app and to an in-memory one in tests.
    pub async fn run(mut self, hooks: Vec<Arc<dyn StateHook<S>>>) {
        let store = S::NAME;
        info!(store, size = self.state.size(), hooks = hooks.len(), "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Apply {
                    command,
                    respond_to,
                } => {
                    debug!(store, ?command, "Apply");
                    match self.state.apply(command) {
                        Ok(outcome) => {
                            let change = S::classify(&outcome);
                            if change != Change::Unchanged {
                                info!(store, ?change, size = self.state.size(), "Applied");
                                for hook in &hooks {
                                    hook.on_change(&self.state, change).await;
                                }
                            } else {
                                debug!(store, "No change");
                            }
                            let _ = respond_to.send(Ok(outcome));
                        }
                        Err(e) => {
                            warn!(store, error = %e, "Command rejected");
                            let _ = respond_to.send(Err(FrameworkError::Rejected(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Read { query, respond_to } => {
                    debug!(store, ?query, "Read");
                    let _ = respond_to.send(Ok(self.state.read(query)));
                }
            }
        }

        info!(store, size = self.state.size(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`StoreActor`]. Cheap to clone.
pub struct StoreClient<S: StoreState> {
    sender: mpsc::Sender<StoreRequest<S>>,
}

impl<S: StoreState> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: StoreState> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>) -> Self {
        Self { sender }
    }

    pub async fn apply(&self, command: S::Command) -> Result<S::Outcome, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Apply {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn read(&self, query: S::Query) -> Result<S::View, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Read { query, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
