//! Error types for the Catalog store.

use crate::model::{InvalidProduct, ProductId};
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The product is not well-formed (empty name, bad price).
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        reason: InvalidProduct,
    },

    /// A replacement catalog names the same product twice.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),

    /// The store replied with a view that does not match the query.
    #[error("Unexpected reply from catalog store")]
    UnexpectedReply,

    /// An error occurred while communicating with the store.
    #[error("Store communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunicationError(msg)
    }
}
