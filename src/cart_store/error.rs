//! Error types for the Cart store.

use super::session::ResumePhase;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// A restored cart is waiting for the continue/start-fresh decision.
    #[error("Cart is locked until the resume decision is made (phase: {0})")]
    ResumePending(ResumePhase),

    /// A decision was sent while none was being asked for.
    #[error("No resume decision is pending (phase: {0})")]
    NoPendingDecision(ResumePhase),

    /// The store replied with a view that does not match the query.
    #[error("Unexpected reply from cart store")]
    UnexpectedReply,

    /// An error occurred while communicating with the store.
    #[error("Store communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
