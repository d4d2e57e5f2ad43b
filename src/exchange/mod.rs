//! # Catalog Exchange
//!
//! Moves the whole catalog in and out as a JSON document: an array of products,
//! the same shape as the catalog snapshot. Import only parses; the caller hands
//! the result to the catalog store, which rejects duplicate ids.

pub mod export;
pub mod import;

pub use export::{backup_file_name, render_catalog, write_backup};
pub use import::parse_catalog;

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the admin when importing or exporting.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("The file is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Valid JSON, but not a list of products.
    #[error("Expected a JSON array of products, found {found}")]
    NotAnArray { found: &'static str },

    #[error("Product #{index} is malformed: {source}")]
    MalformedProduct {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("There are no products to export")]
    EmptyCatalog,

    #[error("Failed to encode catalog: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to write backup {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
