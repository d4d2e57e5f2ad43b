//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then [`expect_apply`]
//! or [`expect_read`] to assert what the client sent. For scripted replies use the
//! fluent [`MockStore`] API instead.

use crate::framework::{FrameworkError, StoreClient, StoreRequest, StoreState};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock store.
enum Expectation<S: StoreState> {
    Apply {
        response: Result<S::Outcome, FrameworkError>,
    },
    Read {
        response: Result<S::View, FrameworkError>,
    },
}

/// A mock store with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockStore::<Preferences>::new();
/// mock.expect_read().return_ok(true);
///
/// let client = PreferencesClient::new(mock.client());
/// assert!(client.admin_mode().await?);
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockStore<S: StoreState> {
    client: StoreClient<S>,
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: StoreState> Default for MockStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StoreState> MockStore<S> {
    /// Creates a new mock store with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<S>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut exps = expectations_clone.lock().unwrap();
                let expectation = exps.pop_front();
                drop(exps);

                match (request, expectation) {
                    (StoreRequest::Apply { respond_to, .. }, Some(Expectation::Apply { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Read { respond_to, .. }, Some(Expectation::Read { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Expects a command.
    pub fn expect_apply(&mut self) -> ApplyExpectationBuilder<S> {
        ApplyExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a query.
    pub fn expect_read(&mut self) -> ReadExpectationBuilder<S> {
        ReadExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for command expectations.
pub struct ApplyExpectationBuilder<S: StoreState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: StoreState> ApplyExpectationBuilder<S> {
    pub fn return_ok(self, outcome: S::Outcome) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Apply {
            response: Ok(outcome),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Apply {
            response: Err(error),
        });
    }
}

/// Builder for query expectations.
pub struct ReadExpectationBuilder<S: StoreState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: StoreState> ReadExpectationBuilder<S> {
    pub fn return_ok(self, view: S::View) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Read { response: Ok(view) });
    }

    pub fn return_err(self, error: FrameworkError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Read {
            response: Err(error),
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// When testing a *client* wrapper (e.g. `CartClient`) there is no need to run a
/// real store. The client sends to a channel we control; the test inspects each
/// message and answers it, which makes success and failure paths deterministic.
pub fn create_mock_client<S: StoreState>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a command.
pub async fn expect_apply<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(
    S::Command,
    tokio::sync::oneshot::Sender<Result<S::Outcome, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Apply {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a query.
pub async fn expect_read<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(
    S::Query,
    tokio::sync::oneshot::Sender<Result<S::View, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Read { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences_store::{Preferences, PreferencesCommand, PreferencesQuery};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Preferences>(10);

        let task = tokio::spawn(async move {
            client.apply(PreferencesCommand::SetAdminMode(true)).await
        });

        let (command, responder) = expect_apply(&mut receiver)
            .await
            .expect("Expected Apply request");
        assert_eq!(command, PreferencesCommand::SetAdminMode(true));
        responder.send(Ok(true)).unwrap();

        assert!(task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mut mock = MockStore::<Preferences>::new();
        mock.expect_read().return_ok(false);
        mock.expect_apply().return_err(FrameworkError::ActorDropped);

        let client = mock.client();
        assert!(!client.read(PreferencesQuery::AdminMode).await.unwrap());
        let err = client
            .apply(PreferencesCommand::ToggleAdminMode)
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::ActorDropped));

        mock.verify();
    }
}
