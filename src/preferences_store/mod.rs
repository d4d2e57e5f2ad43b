//! # Preferences Store
//!
//! Holds the persisted admin-mode flag that switches the storefront between the
//! customer view and the catalog management view.
//!
//! The flag is stored under its own key as the JSON text `true` or `false`.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::framework::{StoreActor, StoreClient};

/// Creates a new Preferences store around a restored state, and its client.
pub fn new(buffer_size: usize, state: Preferences) -> (StoreActor<Preferences>, StoreClient<Preferences>) {
    StoreActor::new(buffer_size, state)
}
