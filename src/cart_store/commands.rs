//! Commands and queries understood by the Cart store.

use super::session::{ResumeDecision, ResumePhase};
use crate::model::{CartItem, CartTotals, OrderSummary, Product, ProductId};

#[derive(Debug, Clone)]
pub enum CartCommand {
    /// Add one unit, merging with an existing line for the same product.
    Add(Product),
    /// Change a line's quantity by `delta`, floored at zero. Zero drops the line.
    AdjustQuantity { id: ProductId, delta: i64 },
    Remove(ProductId),
    Clear,
    Resolve(ResumeDecision),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartOutcome {
    /// The line's quantity after the add.
    Added { id: ProductId, quantity: u32 },
    /// The new quantity, `Some(0)` when the line was dropped, `None` when absent.
    Adjusted(Option<u32>),
    Removed(bool),
    Cleared,
    Resolved(ResumePhase),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartQuery {
    Items,
    Totals,
    Summary,
    Phase,
    Quantity(ProductId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartView {
    Items(Vec<CartItem>),
    Totals(CartTotals),
    Summary(OrderSummary),
    Phase(ResumePhase),
    Quantity(u32),
}
