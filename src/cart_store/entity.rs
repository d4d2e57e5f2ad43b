//! [`StoreState`] implementation for the shopping cart.

use super::commands::{CartCommand, CartOutcome, CartQuery, CartView};
use super::error::CartError;
use super::session::{ResumeDecision, ResumeFlow, ResumePhase};
use crate::framework::{Change, StoreState};
use crate::model::{CartItem, CartTotals, OrderSummary, Product, ProductId};
use std::collections::HashSet;
use tracing::warn;

/// The cart lines plus the resume gate guarding them.
///
/// A fresh `Cart::default()` is in [`ResumePhase::Idle`] and accepts no
/// mutations; build carts through [`StoreState::restore`] or [`Cart::fresh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    flow: ResumeFlow,
}

impl Cart {
    /// An empty cart that accepts mutations right away.
    pub fn fresh() -> Self {
        Self::restore(None)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn phase(&self) -> ResumePhase {
        self.flow.phase()
    }

    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.id() == id)
            .map_or(0, |item| item.quantity)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::of(&self.items)
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary::of(&self.items)
    }

    fn ensure_settled(&self) -> Result<(), CartError> {
        let phase = self.phase();
        if phase.is_settled() {
            Ok(())
        } else {
            Err(CartError::ResumePending(phase))
        }
    }

    fn add(&mut self, product: Product) -> u32 {
        match self.items.iter_mut().find(|item| item.id() == &product.id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                item.quantity
            }
            None => {
                self.items.push(CartItem::new(product, 1));
                1
            }
        }
    }

    fn adjust(&mut self, id: &ProductId, delta: i64) -> Option<u32> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let next = i64::from(self.items[index].quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        if next == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = next;
        }
        Some(next)
    }

    fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }
}

impl StoreState for Cart {
    const NAME: &'static str = "cart";
    type Command = CartCommand;
    type Outcome = CartOutcome;
    type Query = CartQuery;
    type View = CartView;
    type Snapshot = Vec<CartItem>;
    type Error = CartError;

    /// Loads the saved lines and runs the resume check over them.
    ///
    /// Zero-quantity lines and repeated ids are dropped; if nothing usable remains
    /// the cart starts fresh.
    fn restore(snapshot: Option<Vec<CartItem>>) -> Self {
        let mut flow = ResumeFlow::default();
        flow.begin_check();

        let mut seen = HashSet::new();
        let items: Vec<CartItem> = snapshot
            .unwrap_or_default()
            .into_iter()
            .filter(|item| {
                if item.quantity == 0 {
                    warn!(id = %item.id(), "Dropping empty cart line from snapshot");
                    return false;
                }
                if !seen.insert(item.id().clone()) {
                    warn!(id = %item.id(), "Dropping duplicate cart line from snapshot");
                    return false;
                }
                true
            })
            .collect();

        flow.settle_check(!items.is_empty());
        Self { items, flow }
    }

    fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    fn apply(&mut self, command: CartCommand) -> Result<CartOutcome, CartError> {
        match command {
            CartCommand::Resolve(decision) => {
                let phase = self
                    .flow
                    .decide(decision)
                    .ok_or(CartError::NoPendingDecision(self.phase()))?;
                if decision == ResumeDecision::StartFresh {
                    self.items.clear();
                }
                return Ok(CartOutcome::Resolved(phase));
            }
            _ => self.ensure_settled()?,
        }

        match command {
            CartCommand::Add(product) => {
                let id = product.id.clone();
                let quantity = self.add(product);
                Ok(CartOutcome::Added { id, quantity })
            }
            CartCommand::AdjustQuantity { id, delta } => {
                Ok(CartOutcome::Adjusted(self.adjust(&id, delta)))
            }
            CartCommand::Remove(id) => Ok(CartOutcome::Removed(self.remove(&id))),
            CartCommand::Clear => {
                self.items.clear();
                Ok(CartOutcome::Cleared)
            }
            CartCommand::Resolve(_) => Ok(CartOutcome::Resolved(self.phase())),
        }
    }

    fn read(&self, query: CartQuery) -> CartView {
        match query {
            CartQuery::Items => CartView::Items(self.items.clone()),
            CartQuery::Totals => CartView::Totals(self.totals()),
            CartQuery::Summary => CartView::Summary(self.summary()),
            CartQuery::Phase => CartView::Phase(self.phase()),
            CartQuery::Quantity(id) => CartView::Quantity(self.quantity(&id)),
        }
    }

    fn size(&self) -> usize {
        self.items.len()
    }

    fn classify(outcome: &CartOutcome) -> Change {
        match outcome {
            CartOutcome::Added { .. } => Change::Modified,
            CartOutcome::Adjusted(Some(_)) | CartOutcome::Removed(true) => Change::Modified,
            CartOutcome::Adjusted(None) | CartOutcome::Removed(false) => Change::Unchanged,
            CartOutcome::Cleared | CartOutcome::Resolved(ResumePhase::Fresh) => Change::Erased,
            CartOutcome::Resolved(_) => Change::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, original: f64, current: f64) -> Product {
        Product::new(id, format!("Product {id}"), current).with_original_price(original)
    }

    fn restored_with_items() -> Cart {
        Cart::restore(Some(vec![CartItem::new(product("1", 10.0, 8.0), 2)]))
    }

    #[test]
    fn adding_twice_merges_lines() {
        let mut cart = Cart::fresh();
        let bread = product("1", 5.0, 5.0);
        cart.apply(CartCommand::Add(bread.clone())).unwrap();
        let outcome = cart.apply(CartCommand::Add(bread)).unwrap();

        assert_eq!(outcome, CartOutcome::Added { id: "1".into(), quantity: 2 });
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity(&"1".into()), 2);
    }

    #[test]
    fn adjust_floors_at_zero_and_drops_line() {
        let mut cart = Cart::fresh();
        let milk = product("m", 3.0, 3.0);
        for _ in 0..3 {
            cart.apply(CartCommand::Add(milk.clone())).unwrap();
        }
        let outcome = cart
            .apply(CartCommand::AdjustQuantity { id: "m".into(), delta: -100 })
            .unwrap();
        assert_eq!(outcome, CartOutcome::Adjusted(Some(0)));
        assert!(cart.items().is_empty());
        assert_eq!(Cart::classify(&outcome), Change::Modified);
    }

    #[test]
    fn adjust_saturates_on_extreme_deltas() {
        let mut cart = Cart::fresh();
        cart.apply(CartCommand::Add(product("a", 2.0, 2.0))).unwrap();

        let outcome = cart
            .apply(CartCommand::AdjustQuantity { id: "a".into(), delta: i64::MAX })
            .unwrap();
        assert_eq!(outcome, CartOutcome::Adjusted(Some(u32::MAX)));
        assert_eq!(cart.quantity(&"a".into()), u32::MAX);

        let outcome = cart
            .apply(CartCommand::AdjustQuantity { id: "a".into(), delta: i64::MIN })
            .unwrap();
        assert_eq!(outcome, CartOutcome::Adjusted(Some(0)));
        assert!(cart.items().is_empty());
    }

    #[test]
    fn adjust_of_absent_line_changes_nothing() {
        let mut cart = Cart::fresh();
        let outcome = cart
            .apply(CartCommand::AdjustQuantity { id: "nope".into(), delta: 1 })
            .unwrap();
        assert_eq!(outcome, CartOutcome::Adjusted(None));
        assert_eq!(Cart::classify(&outcome), Change::Unchanged);
    }

    #[test]
    fn totals_follow_prices_and_quantities() {
        let mut cart = Cart::fresh();
        let a = product("a", 100.0, 80.0);
        cart.apply(CartCommand::Add(a.clone())).unwrap();
        cart.apply(CartCommand::Add(a)).unwrap();
        cart.apply(CartCommand::Add(product("b", 50.0, 50.0))).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.total, 210.0);
        assert_eq!(totals.total_original, 250.0);
        assert_eq!(totals.total_savings, 40.0);
        assert_eq!(totals.item_count, 3);
    }

    #[test]
    fn restored_cart_is_locked_until_decision() {
        let mut cart = restored_with_items();
        assert_eq!(cart.phase(), ResumePhase::AwaitingDecision);

        let err = cart.apply(CartCommand::Add(product("2", 1.0, 1.0))).unwrap_err();
        assert_eq!(err, CartError::ResumePending(ResumePhase::AwaitingDecision));
        assert!(matches!(
            cart.apply(CartCommand::Clear),
            Err(CartError::ResumePending(_))
        ));
        assert_eq!(cart.items().len(), 1);

        let outcome = cart.apply(CartCommand::Resolve(ResumeDecision::Continue)).unwrap();
        assert_eq!(outcome, CartOutcome::Resolved(ResumePhase::Resuming));
        assert_eq!(Cart::classify(&outcome), Change::Unchanged);
        assert_eq!(cart.items().len(), 1);

        cart.apply(CartCommand::Add(product("2", 1.0, 1.0))).unwrap();
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn start_fresh_behaves_like_clear() {
        let mut cart = restored_with_items();
        let outcome = cart
            .apply(CartCommand::Resolve(ResumeDecision::StartFresh))
            .unwrap();
        assert_eq!(outcome, CartOutcome::Resolved(ResumePhase::Fresh));
        assert_eq!(Cart::classify(&outcome), Change::Erased);
        assert!(cart.items().is_empty());
        assert_eq!(Cart::classify(&CartOutcome::Cleared), Change::Erased);
    }

    #[test]
    fn resolve_without_pending_decision_is_rejected() {
        let mut cart = Cart::fresh();
        let err = cart
            .apply(CartCommand::Resolve(ResumeDecision::Continue))
            .unwrap_err();
        assert_eq!(err, CartError::NoPendingDecision(ResumePhase::Fresh));
    }

    #[test]
    fn idle_cart_rejects_mutations() {
        let mut cart = Cart::default();
        assert!(matches!(
            cart.apply(CartCommand::Remove("1".into())),
            Err(CartError::ResumePending(ResumePhase::Idle))
        ));
    }

    #[test]
    fn restore_skips_unusable_lines() {
        let cart = Cart::restore(Some(vec![
            CartItem::new(product("1", 1.0, 1.0), 0),
            CartItem::new(product("2", 1.0, 1.0), 1),
            CartItem::new(product("2", 1.0, 1.0), 4),
        ]));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity(&"2".into()), 1);

        let only_empty = Cart::restore(Some(vec![CartItem::new(product("1", 1.0, 1.0), 0)]));
        assert_eq!(only_empty.phase(), ResumePhase::Fresh);
    }
}
