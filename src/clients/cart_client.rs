use super::store_client::{domain_client, DomainClient};
use crate::cart_store::{
    Cart, CartCommand, CartError, CartOutcome, CartQuery, CartView, ResumeDecision, ResumePhase,
};
use crate::model::{CartItem, CartTotals, OrderSummary, Product, ProductId};
use tracing::instrument;

domain_client!(Cart, CartError);

impl CartClient {
    /// Adds one unit and returns the line's new quantity.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn add(&self, product: Product) -> Result<u32, CartError> {
        match self.apply(CartCommand::Add(product)).await? {
            CartOutcome::Added { quantity, .. } => Ok(quantity),
            _ => Err(CartError::UnexpectedReply),
        }
    }

    /// Returns the new quantity, or `None` when the product was not in the cart.
    #[instrument(skip(self))]
    pub async fn adjust(&self, id: ProductId, delta: i64) -> Result<Option<u32>, CartError> {
        match self.apply(CartCommand::AdjustQuantity { id, delta }).await? {
            CartOutcome::Adjusted(quantity) => Ok(quantity),
            _ => Err(CartError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: ProductId) -> Result<bool, CartError> {
        match self.apply(CartCommand::Remove(id)).await? {
            CartOutcome::Removed(removed) => Ok(removed),
            _ => Err(CartError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        match self.apply(CartCommand::Clear).await? {
            CartOutcome::Cleared => Ok(()),
            _ => Err(CartError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, decision: ResumeDecision) -> Result<ResumePhase, CartError> {
        match self.apply(CartCommand::Resolve(decision)).await? {
            CartOutcome::Resolved(phase) => Ok(phase),
            _ => Err(CartError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn items(&self) -> Result<Vec<CartItem>, CartError> {
        match self.read(CartQuery::Items).await? {
            CartView::Items(items) => Ok(items),
            _ => Err(CartError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn totals(&self) -> Result<CartTotals, CartError> {
        match self.read(CartQuery::Totals).await? {
            CartView::Totals(totals) => Ok(totals),
            _ => Err(CartError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<OrderSummary, CartError> {
        match self.read(CartQuery::Summary).await? {
            CartView::Summary(summary) => Ok(summary),
            _ => Err(CartError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn phase(&self) -> Result<ResumePhase, CartError> {
        match self.read(CartQuery::Phase).await? {
            CartView::Phase(phase) => Ok(phase),
            _ => Err(CartError::UnexpectedReply),
        }
    }

    #[instrument(skip(self))]
    pub async fn quantity(&self, id: ProductId) -> Result<u32, CartError> {
        match self.read(CartQuery::Quantity(id)).await? {
            CartView::Quantity(quantity) => Ok(quantity),
            _ => Err(CartError::UnexpectedReply),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_apply, expect_read, MockStore};
    use crate::framework::FrameworkError;

    #[tokio::test]
    async fn test_add_returns_quantity() {
        let (store, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(store);

        let task = tokio::spawn(async move { client.add(Product::new("1", "Bread", 2.0)).await });

        let (command, responder) = expect_apply(&mut receiver)
            .await
            .expect("Expected Apply request");
        assert!(matches!(command, CartCommand::Add(ref p) if p.id.as_str() == "1"));
        responder
            .send(Ok(CartOutcome::Added {
                id: "1".into(),
                quantity: 2,
            }))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_phase_query() {
        let (store, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(store);

        let task = tokio::spawn(async move { client.phase().await });

        let (query, responder) = expect_read(&mut receiver)
            .await
            .expect("Expected Read request");
        assert_eq!(query, CartQuery::Phase);
        responder
            .send(Ok(CartView::Phase(ResumePhase::AwaitingDecision)))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), ResumePhase::AwaitingDecision);
    }

    #[tokio::test]
    async fn test_pending_resume_surfaces_as_cart_error() {
        let mut mock = MockStore::<Cart>::new();
        mock.expect_apply().return_err(FrameworkError::Rejected(Box::new(
            CartError::ResumePending(ResumePhase::AwaitingDecision),
        )));
        mock.expect_apply().return_err(FrameworkError::ActorDropped);

        let client = CartClient::new(mock.client());
        assert_eq!(
            client.clear().await.unwrap_err(),
            CartError::ResumePending(ResumePhase::AwaitingDecision)
        );
        assert!(matches!(
            client.remove("1".into()).await.unwrap_err(),
            CartError::ActorCommunicationError(_)
        ));
        mock.verify();
    }
}
