//! [`StoreState`] implementation for the product catalog.
//!
//! The catalog is an ordered list: new products go to the front, edits keep their
//! position. Categories and filtered listings are derived on every read.

use super::commands::{CatalogCommand, CatalogOutcome, CatalogQuery, CatalogView};
use super::error::CatalogError;
use crate::framework::{Change, StoreState};
use crate::model::{CategoryFilter, Product, ProductId};
use chrono::Utc;
use std::collections::HashSet;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from saved products, dropping invalid ones and keeping the
    /// first of any duplicate id.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut seen = HashSet::new();
        let products = products
            .into_iter()
            .filter(|p| {
                if let Err(reason) = p.validate() {
                    warn!(id = %p.id, %reason, "Dropping invalid product from snapshot");
                    return false;
                }
                let fresh = seen.insert(p.id.clone());
                if !fresh {
                    warn!(id = %p.id, "Dropping duplicate product from snapshot");
                }
                fresh
            })
            .collect();
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Replaces in place or prepends. Returns `true` when the product is new.
    pub fn upsert(&mut self, product: Product) -> Result<bool, CatalogError> {
        product
            .validate()
            .map_err(|reason| CatalogError::InvalidProduct {
                id: product.id.clone(),
                reason,
            })?;
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product;
                Ok(false)
            }
            None => {
                self.products.insert(0, product);
                Ok(true)
            }
        }
    }

    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| &p.id != id);
        self.products.len() != before
    }

    /// Swaps in a whole new product list. Nothing changes unless every product is
    /// valid and every id is unique.
    pub fn replace_all(&mut self, products: Vec<Product>) -> Result<usize, CatalogError> {
        {
            let mut seen = HashSet::new();
            for product in &products {
                product
                    .validate()
                    .map_err(|reason| CatalogError::InvalidProduct {
                        id: product.id.clone(),
                        reason,
                    })?;
                if !seen.insert(&product.id) {
                    return Err(CatalogError::DuplicateId(product.id.clone()));
                }
            }
        }
        self.products = products;
        Ok(self.products.len())
    }

    /// `[All, <effective categories in first-seen order>]`.
    pub fn categories(&self) -> Vec<CategoryFilter> {
        let mut seen = HashSet::new();
        let mut categories = vec![CategoryFilter::All];
        for product in &self.products {
            let label = product.effective_category();
            if seen.insert(label) {
                categories.push(CategoryFilter::Only(label.to_string()));
            }
        }
        categories
    }

    pub fn filtered(&self, category: &CategoryFilter, search: &str) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| category.matches(p) && p.matches_search(search))
            .cloned()
            .collect()
    }
}

impl StoreState for Catalog {
    const NAME: &'static str = "catalog";
    type Command = CatalogCommand;
    type Outcome = CatalogOutcome;
    type Query = CatalogQuery;
    type View = CatalogView;
    type Snapshot = Vec<Product>;
    type Error = CatalogError;

    fn restore(snapshot: Option<Vec<Product>>) -> Self {
        Self::from_products(snapshot.unwrap_or_default())
    }

    fn snapshot(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn apply(&mut self, command: CatalogCommand) -> Result<CatalogOutcome, CatalogError> {
        match command {
            CatalogCommand::Upsert(product) => {
                let id = product.id.clone();
                let created = self.upsert(product)?;
                Ok(CatalogOutcome::Upserted { id, created })
            }
            CatalogCommand::Save { id, draft } => {
                let previous = id.as_ref().and_then(|id| self.get(id));
                let mut product = draft.into_product(previous, Utc::now());
                if let (None, Some(id)) = (previous, id) {
                    // Editing a product deleted meanwhile: keep the caller's id.
                    product.id = id;
                }
                self.upsert(product.clone())?;
                Ok(CatalogOutcome::Saved(product))
            }
            CatalogCommand::Remove(id) => Ok(CatalogOutcome::Removed(self.remove(&id))),
            CatalogCommand::ReplaceAll(products) => {
                Ok(CatalogOutcome::Replaced(self.replace_all(products)?))
            }
        }
    }

    fn read(&self, query: CatalogQuery) -> CatalogView {
        match query {
            CatalogQuery::All => CatalogView::Products(self.products.clone()),
            CatalogQuery::Get(id) => CatalogView::Product(self.get(&id).cloned()),
            CatalogQuery::Categories => CatalogView::Categories(self.categories()),
            CatalogQuery::Filtered { category, search } => {
                CatalogView::Products(self.filtered(&category, &search))
            }
        }
    }

    fn size(&self) -> usize {
        self.products.len()
    }

    fn classify(outcome: &CatalogOutcome) -> Change {
        match outcome {
            CatalogOutcome::Removed(false) => Change::Unchanged,
            _ => Change::Modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductDraft, OTHER_CATEGORY};

    fn product(id: &str, name: &str, category: Option<&str>) -> Product {
        let p = Product::new(id, name, 10.0);
        match category {
            Some(c) => p.with_category(c),
            None => p,
        }
    }

    #[test]
    fn upsert_prepends_new_and_replaces_in_place() {
        let mut catalog = Catalog::default();
        assert_eq!(catalog.upsert(product("1", "Bread", None)), Ok(true));
        assert_eq!(catalog.upsert(product("2", "Milk", None)), Ok(true));
        assert_eq!(catalog.upsert(product("3", "Eggs", None)), Ok(true));

        let ids: Vec<_> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);

        assert_eq!(catalog.upsert(product("2", "Whole Milk", None)), Ok(false));
        let names: Vec<_> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Whole Milk", "Bread"]);
    }

    #[test]
    fn repeated_upserts_keep_ids_unique() {
        let mut catalog = Catalog::default();
        for round in 0..3 {
            for id in ["a", "b", "a", "c", "b"] {
                catalog
                    .upsert(product(id, &format!("{id}-{round}"), None))
                    .unwrap();
            }
        }
        let mut ids: Vec<_> = catalog.products().iter().map(|p| p.id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 3);
    }

    #[test]
    fn upsert_rejects_invalid_products() {
        let mut catalog = Catalog::default();
        let err = catalog.upsert(product("1", "", None)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidProduct { .. }));
        assert!(catalog.products().is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut catalog = Catalog::from_products(vec![product("1", "Bread", None)]);
        assert!(catalog.remove(&"1".into()));
        assert!(!catalog.remove(&"1".into()));
        assert!(!catalog.remove(&"missing".into()));
        assert_eq!(catalog.size(), 0);
    }

    #[test]
    fn replace_all_is_all_or_nothing() {
        let mut catalog = Catalog::from_products(vec![product("1", "Bread", None)]);
        let err = catalog
            .replace_all(vec![product("2", "Milk", None), product("2", "Milk again", None)])
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("2".into()));
        assert_eq!(catalog.products()[0].name, "Bread");

        assert_eq!(
            catalog.replace_all(vec![product("7", "Jam", None), product("8", "Tea", None)]),
            Ok(2)
        );
        assert_eq!(catalog.products()[0].id.as_str(), "7");
    }

    #[test]
    fn categories_are_first_seen_with_all_first() {
        let catalog = Catalog::from_products(vec![
            product("1", "Bread", Some("Bakery")),
            product("2", "Soap", None),
            product("3", "Cake", Some("Bakery")),
            product("4", "Milk", Some("Dairy")),
        ]);
        assert_eq!(
            catalog.categories(),
            vec![
                CategoryFilter::All,
                CategoryFilter::Only("Bakery".into()),
                CategoryFilter::Only(OTHER_CATEGORY.into()),
                CategoryFilter::Only("Dairy".into()),
            ]
        );
    }

    #[test]
    fn filter_excludes_other_categories_for_any_search() {
        let catalog = Catalog::from_products(vec![
            product("1", "Apple pie", Some("A")),
            product("2", "Apple juice", Some("B")),
            product("3", "Banana", Some("A")),
        ]);
        let only_a = CategoryFilter::Only("A".into());
        for search in ["", "apple", "APPLE", "juice", "zzz"] {
            let found = catalog.filtered(&only_a, search);
            assert!(found.iter().all(|p| p.effective_category() == "A"));
        }
        assert_eq!(catalog.filtered(&only_a, "").len(), 2);
        assert_eq!(catalog.filtered(&only_a, "apple").len(), 1);
        assert_eq!(catalog.filtered(&CategoryFilter::All, "apple").len(), 2);
    }

    #[test]
    fn restore_drops_duplicate_ids() {
        let catalog = Catalog::restore(Some(vec![
            product("1", "First", None),
            product("1", "Second", None),
        ]));
        assert_eq!(catalog.size(), 1);
        assert_eq!(catalog.products()[0].name, "First");
    }

    #[test]
    fn restore_drops_invalid_products() {
        let catalog = Catalog::restore(Some(vec![
            product("1", "  ", None),
            Product::new("2", "Salt", -1.0),
            product("3", "Bread", None),
        ]));
        let ids: Vec<_> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn save_creates_then_edits() {
        let mut catalog = Catalog::default();
        let created = match catalog
            .apply(CatalogCommand::Save {
                id: None,
                draft: ProductDraft::new("Dates", 30.0),
            })
            .unwrap()
        {
            CatalogOutcome::Saved(p) => p,
            other => panic!("unexpected outcome {other:?}"),
        };
        assert_eq!(created.price_history.len(), 1);

        let edited = match catalog
            .apply(CatalogCommand::Save {
                id: Some(created.id.clone()),
                draft: ProductDraft::new("Medjool Dates", 35.0),
            })
            .unwrap()
        {
            CatalogOutcome::Saved(p) => p,
            other => panic!("unexpected outcome {other:?}"),
        };
        assert_eq!(edited.id, created.id);
        assert_eq!(edited.price_history.len(), 2);
        assert_eq!(catalog.size(), 1);
        assert_eq!(catalog.get(&created.id).unwrap().name, "Medjool Dates");
    }

    #[test]
    fn removing_absent_product_is_unchanged() {
        assert_eq!(Catalog::classify(&CatalogOutcome::Removed(false)), Change::Unchanged);
        assert_eq!(Catalog::classify(&CatalogOutcome::Removed(true)), Change::Modified);
    }
}
