//! # Cart Store
//!
//! Owns the shopper's cart lines and the resume gate in front of them.
//!
//! A cart restored with items starts in [`ResumePhase::AwaitingDecision`]: it can be
//! read, but `Add`, `AdjustQuantity`, `Remove` and `Clear` are rejected with
//! [`CartError::ResumePending`] until a [`ResumeDecision`] arrives. Starting fresh
//! empties the cart and erases its saved snapshot, exactly like `Clear`.

pub mod commands;
pub mod entity;
pub mod error;
pub mod session;

pub use commands::*;
pub use entity::*;
pub use error::*;
pub use session::*;

use crate::framework::{StoreActor, StoreClient};

/// Creates a new Cart store around a restored state, and its client.
pub fn new(buffer_size: usize, state: Cart) -> (StoreActor<Cart>, StoreClient<Cart>) {
    StoreActor::new(buffer_size, state)
}
