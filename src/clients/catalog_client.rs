use super::store_client::{domain_client, DomainClient};
use crate::catalog_store::{Catalog, CatalogCommand, CatalogError, CatalogOutcome, CatalogQuery, CatalogView};
use crate::model::{CategoryFilter, Product, ProductDraft, ProductId};
use tracing::instrument;

domain_client!(Catalog, CatalogError);

impl CatalogClient {
    /// Every product, newest first.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        match self.read(CatalogQuery::All).await? {
            CatalogView::Products(products) => Ok(products),
            _ => Err(CatalogError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        match self.read(CatalogQuery::Get(id)).await? {
            CatalogView::Product(product) => Ok(product),
            _ => Err(CatalogError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<CategoryFilter>, CatalogError> {
        match self.read(CatalogQuery::Categories).await? {
            CatalogView::Categories(categories) => Ok(categories),
            _ => Err(CatalogError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn filtered(
        &self,
        category: CategoryFilter,
        search: String,
    ) -> Result<Vec<Product>, CatalogError> {
        match self.read(CatalogQuery::Filtered { category, search }).await? {
            CatalogView::Products(products) => Ok(products),
            _ => Err(CatalogError::UnexpectedReply),
        }
    }

    /// Returns `true` when the product was new.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn upsert(&self, product: Product) -> Result<bool, CatalogError> {
        match self.apply(CatalogCommand::Upsert(product)).await? {
            CatalogOutcome::Upserted { created, .. } => Ok(created),
            _ => Err(CatalogError::UnexpectedReply),
        }
    }

    /// Creates (`id == None`) or edits a product from a form draft.
    #[instrument(skip(self, draft))]
    pub async fn save(
        &self,
        id: Option<ProductId>,
        draft: ProductDraft,
    ) -> Result<Product, CatalogError> {
        match self.apply(CatalogCommand::Save { id, draft }).await? {
            CatalogOutcome::Saved(product) => Ok(product),
            _ => Err(CatalogError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: ProductId) -> Result<bool, CatalogError> {
        match self.apply(CatalogCommand::Remove(id)).await? {
            CatalogOutcome::Removed(removed) => Ok(removed),
            _ => Err(CatalogError::UnexpectedReply),
        }
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn replace_all(&self, products: Vec<Product>) -> Result<usize, CatalogError> {
        match self.apply(CatalogCommand::ReplaceAll(products)).await? {
            CatalogOutcome::Replaced(count) => Ok(count),
            _ => Err(CatalogError::UnexpectedReply),
        }
    }
}
