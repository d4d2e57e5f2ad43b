//! Type-safe wrappers around [`StoreClient`](crate::framework::StoreClient).
//!
//! Each wrapper exposes the store's commands and queries as plain async methods
//! and returns the store's own error type.

pub mod cart_client;
pub mod catalog_client;
pub mod preferences_client;
pub mod store_client;

pub use cart_client::*;
pub use catalog_client::*;
pub use preferences_client::*;
pub use store_client::DomainClient;
