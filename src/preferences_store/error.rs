//! Error types for the Preferences store.

use thiserror::Error;

/// Errors that can occur during preference operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PreferencesError {
    /// An error occurred while communicating with the store.
    #[error("Store communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PreferencesError {
    fn from(msg: String) -> Self {
        PreferencesError::ActorCommunicationError(msg)
    }
}
