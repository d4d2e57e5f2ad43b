//! # Catalog Store
//!
//! Owns the ordered list of products offered by the storefront.
//!
//! ## Rules
//! - Product ids are unique within the catalog.
//! - A new product is prepended; an edit replaces the product in place.
//! - Deleting an unknown id is a no-op and does not trigger a save.
//! - Replacing the whole catalog is all-or-nothing.
//!
//! Categories and filtered listings are computed from the current list on every
//! query, so they can never go stale.

pub mod commands;
pub mod entity;
pub mod error;

pub use commands::*;
pub use entity::*;
pub use error::*;

use crate::framework::{StoreActor, StoreClient};

/// Creates a new Catalog store around a restored state, and its client.
pub fn new(buffer_size: usize, state: Catalog) -> (StoreActor<Catalog>, StoreClient<Catalog>) {
    StoreActor::new(buffer_size, state)
}
