//! Pure data structures shared by the stores: products, cart lines, and derived totals.

pub mod cart_item;
pub mod product;

pub use cart_item::*;
pub use product::*;
