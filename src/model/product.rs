//! Represents a sellable product in the catalog.
//!
//! # Store Framework
//! Products live inside the [`Catalog`](crate::catalog_store::Catalog) state, which
//! implements [`StoreState`](crate::framework::StoreState) and is managed by a
//! [`StoreActor`](crate::framework::StoreActor).
//!
//! See [`ProductDraft`] for the admin form payload and
//! [`CatalogCommand`](crate::catalog_store::CatalogCommand) for the operations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Label used when a product has no category.
pub const OTHER_CATEGORY: &str = "other";

/// Label of the catch-all category filter.
pub const ALL_CATEGORIES: &str = "all";

/// Type-safe identifier for Products.
///
/// The canonical form is a string. Snapshots and import files written by older
/// clients may carry numeric ids; those are accepted and normalized, so `1700000000000`
/// and `"1700000000000"` name the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh identifier for a newly created product.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// One recorded price point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub price: f64,
    pub date: DateTime<Utc>,
}

/// Reasons a product is not well-formed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidProduct {
    #[error("product name is empty")]
    EmptyName,

    #[error("{field} must be a non-negative amount, got {value}")]
    InvalidPrice { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pre-discount reference price. `None` means "same as the current price".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub current_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub price_history: Vec<PriceEntry>,
}

impl Product {
    /// Creates a new Product instance with no optional fields set.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `name` - Display name
    /// * `current_price` - The amount charged
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, current_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            original_price: None,
            current_price,
            image: None,
            category: None,
            expiry_date: None,
            is_new: false,
            price_history: Vec::new(),
        }
    }

    pub fn with_original_price(mut self, price: f64) -> Self {
        self.original_price = Some(price);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The reference price used for savings, falling back to the current price.
    pub fn original_price(&self) -> f64 {
        self.original_price.unwrap_or(self.current_price)
    }

    /// The product's category, or [`OTHER_CATEGORY`] when unset or blank.
    ///
    /// Every category comparison in the crate goes through this method.
    pub fn effective_category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(OTHER_CATEGORY)
    }

    /// Amount saved on one unit, never negative.
    pub fn savings(&self) -> f64 {
        (self.original_price() - self.current_price).max(0.0)
    }

    /// Whole-number discount percentage, 0 when there is no discount.
    pub fn discount_percent(&self) -> u32 {
        let original = self.original_price();
        if original > 0.0 && original > self.current_price {
            (self.savings() / original * 100.0).round() as u32
        } else {
            0
        }
    }

    /// Case-insensitive substring match on the name. A blank query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }

    pub fn validate(&self) -> Result<(), InvalidProduct> {
        if self.name.trim().is_empty() {
            return Err(InvalidProduct::EmptyName);
        }
        check_price("currentPrice", self.current_price)?;
        if let Some(original) = self.original_price {
            check_price("originalPrice", original)?;
        }
        Ok(())
    }
}

fn check_price(field: &'static str, value: f64) -> Result<(), InvalidProduct> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidProduct::InvalidPrice { field, value })
    }
}

/// Which products a listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parses a UI label; [`ALL_CATEGORIES`] selects everything.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => product.effective_category() == label,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(label) => f.write_str(label),
        }
    }
}

/// Payload produced by the admin product form.
///
/// The form has already checked that a name and a parseable current price were
/// entered; the draft carries the parsed values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub original_price: Option<f64>,
    pub current_price: f64,
    pub image: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub is_new: bool,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, current_price: f64) -> Self {
        Self {
            name: name.into(),
            current_price,
            is_new: true,
            ..Self::default()
        }
    }

    /// Builds the product to store from this draft.
    ///
    /// # Arguments
    /// * `previous` - The product being edited, or `None` when creating
    /// * `now` - Timestamp recorded in the price history
    ///
    /// The id and price history of `previous` are kept. A history entry is appended
    /// when creating, or when an edit changes the current price.
    pub fn into_product(self, previous: Option<&Product>, now: DateTime<Utc>) -> Product {
        let mut price_history = previous
            .map(|p| p.price_history.clone())
            .unwrap_or_default();
        let price_changed = previous.map_or(true, |p| p.current_price != self.current_price);
        if price_changed {
            price_history.push(PriceEntry {
                price: self.current_price,
                date: now,
            });
        }

        let description = self.description.trim();
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Product {
            id: previous
                .map(|p| p.id.clone())
                .unwrap_or_else(ProductId::generate),
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            original_price: Some(self.original_price.unwrap_or(self.current_price)),
            current_price: self.current_price,
            image: self.image.filter(|i| !i.is_empty()),
            category,
            expiry_date: self.expiry_date,
            is_new: self.is_new,
            price_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_ids_are_the_same_product() {
        let from_number: Product =
            serde_json::from_str(r#"{"id": 1700000000000, "name": "Dates", "currentPrice": 5}"#)
                .unwrap();
        let from_text: Product =
            serde_json::from_str(r#"{"id": "1700000000000", "name": "Dates", "currentPrice": 5}"#)
                .unwrap();
        assert_eq!(from_number.id, from_text.id);
        assert_eq!(from_number.id.as_str(), "1700000000000");
    }

    #[test]
    fn ids_serialize_as_strings() {
        let product = Product::new(42u64, "Honey", 10.0);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["currentPrice"], 10.0);
        assert!(json.get("originalPrice").is_none());
    }

    #[test]
    fn effective_category_falls_back_to_other() {
        let plain = Product::new("1", "Flour", 3.0);
        let blank = Product::new("2", "Sugar", 2.0).with_category("  ");
        let labelled = Product::new("3", "Oil", 7.0).with_category("Pantry");
        assert_eq!(plain.effective_category(), OTHER_CATEGORY);
        assert_eq!(blank.effective_category(), OTHER_CATEGORY);
        assert_eq!(labelled.effective_category(), "Pantry");
    }

    #[test]
    fn discount_is_derived_from_prices() {
        let product = Product::new("1", "Coffee", 75.0).with_original_price(100.0);
        assert_eq!(product.savings(), 25.0);
        assert_eq!(product.discount_percent(), 25);

        let no_discount = Product::new("2", "Tea", 40.0);
        assert_eq!(no_discount.original_price(), 40.0);
        assert_eq!(no_discount.discount_percent(), 0);

        let markup = Product::new("3", "Rice", 50.0).with_original_price(30.0);
        assert_eq!(markup.savings(), 0.0);
        assert_eq!(markup.discount_percent(), 0);
    }

    #[test]
    fn search_is_case_insensitive() {
        let product = Product::new("1", "Dark Chocolate", 12.0);
        assert!(product.matches_search("choc"));
        assert!(product.matches_search("DARK"));
        assert!(product.matches_search(""));
        assert!(!product.matches_search("   "));
        assert!(!product.matches_search("chocolate "));
        assert!(!product.matches_search("vanilla"));
    }

    #[test]
    fn validate_rejects_bad_products() {
        assert_eq!(
            Product::new("1", " ", 1.0).validate(),
            Err(InvalidProduct::EmptyName)
        );
        assert!(matches!(
            Product::new("1", "Salt", -1.0).validate(),
            Err(InvalidProduct::InvalidPrice { field: "currentPrice", .. })
        ));
        assert!(matches!(
            Product::new("1", "Salt", 1.0)
                .with_original_price(f64::NAN)
                .validate(),
            Err(InvalidProduct::InvalidPrice { field: "originalPrice", .. })
        ));
        assert!(Product::new("1", "Salt", 0.0).validate().is_ok());
    }

    #[test]
    fn category_filter_labels() {
        assert_eq!(CategoryFilter::from_label("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_label("Bakery"),
            CategoryFilter::Only("Bakery".into())
        );
        assert_eq!(CategoryFilter::All.to_string(), "all");

        let other = Product::new("1", "Misc", 1.0);
        assert!(CategoryFilter::Only(OTHER_CATEGORY.into()).matches(&other));
        assert!(!CategoryFilter::Only("Bakery".into()).matches(&other));
    }

    #[test]
    fn new_draft_records_initial_price() {
        let now = Utc::now();
        let mut draft = ProductDraft::new("  Olive Oil ", 90.0);
        draft.description = "  cold pressed ".into();
        draft.category = Some("".into());

        let product = draft.into_product(None, now);
        assert_eq!(product.name, "Olive Oil");
        assert_eq!(product.description.as_deref(), Some("cold pressed"));
        assert_eq!(product.original_price, Some(90.0));
        assert_eq!(product.category, None);
        assert!(product.is_new);
        assert_eq!(product.price_history, vec![PriceEntry { price: 90.0, date: now }]);
    }

    #[test]
    fn edit_keeps_id_and_appends_history_only_on_price_change() {
        let created = ProductDraft::new("Cheese", 50.0).into_product(None, Utc::now());

        let unchanged = ProductDraft::new("Aged Cheese", 50.0).into_product(Some(&created), Utc::now());
        assert_eq!(unchanged.id, created.id);
        assert_eq!(unchanged.price_history.len(), 1);

        let repriced = ProductDraft::new("Aged Cheese", 45.0).into_product(Some(&unchanged), Utc::now());
        assert_eq!(repriced.id, created.id);
        assert_eq!(repriced.price_history.len(), 2);
        assert_eq!(repriced.price_history[1].price, 45.0);
    }
}
