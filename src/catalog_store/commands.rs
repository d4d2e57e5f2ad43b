//! Commands and queries understood by the Catalog store.
//!
//! Commands change the product list; queries derive views from it on every read.
//! See [`Catalog`](super::Catalog) for the semantics of each.

use crate::model::{CategoryFilter, Product, ProductDraft, ProductId};

#[derive(Debug, Clone)]
pub enum CatalogCommand {
    /// Replace the product with the same id in place, or prepend it.
    Upsert(Product),
    /// Build a product from an admin form submission and upsert it.
    ///
    /// `id` names the product being edited; `None` creates a new one.
    Save {
        id: Option<ProductId>,
        draft: ProductDraft,
    },
    /// Delete a product. Absent ids are a no-op.
    Remove(ProductId),
    /// Replace the whole catalog (import path).
    ReplaceAll(Vec<Product>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOutcome {
    Upserted { id: ProductId, created: bool },
    Saved(Product),
    Removed(bool),
    Replaced(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogQuery {
    All,
    Get(ProductId),
    Categories,
    Filtered {
        category: CategoryFilter,
        search: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView {
    Products(Vec<Product>),
    Product(Option<Product>),
    Categories(Vec<CategoryFilter>),
}
