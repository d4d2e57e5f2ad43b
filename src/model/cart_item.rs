use serde::{Deserialize, Serialize};

use super::product::{Product, ProductId};

/// A product selected into the cart, with how many units were picked.
///
/// Serialized as the product's fields plus `quantity`, so cart snapshots stay
/// readable as plain product records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    pub fn line_total(&self) -> f64 {
        self.product.current_price * f64::from(self.quantity)
    }

    pub fn line_original(&self) -> f64 {
        self.product.original_price() * f64::from(self.quantity)
    }
}

/// Aggregates derived from the cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartTotals {
    pub total_original: f64,
    pub total: f64,
    pub total_savings: f64,
    pub item_count: u64,
}

impl CartTotals {
    pub fn of(items: &[CartItem]) -> Self {
        let total_original: f64 = items.iter().map(CartItem::line_original).sum();
        let total: f64 = items.iter().map(CartItem::line_total).sum();
        Self {
            total_original,
            total,
            total_savings: total_original - total,
            item_count: items.iter().map(|item| u64::from(item.quantity)).sum(),
        }
    }
}

/// One line of the order handed to the messaging integration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub line_total: f64,
    pub line_savings: f64,
}

/// Structured order summary. Rendering it into a message is the integration's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub total: f64,
    pub total_savings: f64,
}

impl OrderSummary {
    pub fn of(items: &[CartItem]) -> Self {
        let totals = CartTotals::of(items);
        Self {
            lines: items
                .iter()
                .map(|item| OrderLine {
                    name: item.product.name.clone(),
                    quantity: item.quantity,
                    line_total: item.line_total(),
                    line_savings: item.line_original() - item.line_total(),
                })
                .collect(),
            total: totals.total,
            total_savings: totals.total_savings,
        }
    }
}
