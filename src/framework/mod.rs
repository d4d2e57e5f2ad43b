//! Generic store framework.
//!
//! This module provides the building blocks for type-safe state stores that apply
//! commands sequentially and notify observers after every change.
//!
//! # Main Components
//!
//! - [`StoreState`] - Trait that store states implement
//! - [`StoreActor`] - Generic task that owns a state and processes requests
//! - [`StoreClient`] - Typed handle for sending commands and queries
//! - [`StateHook`] - Observer notified after state changes (persistence plugs in here)
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning a store.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
