use crate::cart_store::{Cart, ResumeDecision, ResumePhase};
use crate::catalog_store::Catalog;
use crate::clients::{CartClient, CatalogClient, PreferencesClient};
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::exchange;
use crate::framework::StateHook;
use crate::model::{CartItem, CartTotals, CategoryFilter, OrderSummary, Product, ProductDraft, ProductId};
use crate::persistence::{
    load_state, FileBackend, PersistHook, PersistenceError, SnapshotBackend, SnapshotKeys,
};
use crate::preferences_store::Preferences;
use crate::transient::TransientFlag;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// What the shopper is currently looking at. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
struct ViewState {
    search: String,
    category: CategoryFilter,
    selected: Option<ProductId>,
}

/// The runtime orchestrator of the storefront.
///
/// `Storefront` is responsible for:
/// - **Lifecycle Management**: restoring snapshots, starting every store and
///   stopping them again
/// - **Persistence Wiring**: registering a [`PersistHook`] on each store so every
///   change is written under its key
/// - **View State**: search text, active category, selected product and the two
///   transient indicators
///
/// There is no global instance: the event-handling layer owns one `Storefront`
/// and calls it by reference.
///
/// # Example
///
/// ```ignore
/// let mut shop = Storefront::open(StorefrontConfig::load()?).await?;
///
/// if shop.resume_phase().await? == ResumePhase::AwaitingDecision {
///     shop.continue_order().await?;
/// }
/// let dates = shop.save_product(None, ProductDraft::new("Dates", 30.0)).await?;
/// shop.add_to_cart(dates).await?;
///
/// shop.shutdown().await?;
/// ```
pub struct Storefront {
    /// Client for the Catalog store
    pub catalog: CatalogClient,

    /// Client for the Cart store
    pub cart: CartClient,

    /// Client for the Preferences store
    pub preferences: PreferencesClient,

    view: ViewState,
    search_indicator: TransientFlag,
    cart_pulse: TransientFlag,
    key_prefix: String,
    export_dir: PathBuf,

    /// Task handles for all running stores (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Opens the storefront with snapshots stored as files in `storage.dir`.
    ///
    /// The directory is created up front so a bad path fails here rather than on
    /// the first save.
    pub async fn open(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let dir = config.storage.dir.clone();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| PersistenceError::Io {
                key: dir.display().to_string(),
                source,
            })?;
        let backend = Arc::new(FileBackend::new(dir));
        Ok(Self::open_with_backend(config, backend).await)
    }

    /// Restores every store from `backend` and starts it.
    ///
    /// This method:
    /// 1. Loads the catalog, cart and preference snapshots (bad ones count as absent)
    /// 2. Runs the cart's resume check as part of restoring it
    /// 3. Spawns one store task per state, each with a persistence hook
    pub async fn open_with_backend(
        config: StorefrontConfig,
        backend: Arc<dyn SnapshotBackend>,
    ) -> Self {
        let keys = SnapshotKeys::from_prefix(&config.storage.key_prefix);
        let capacity = config.stores.channel_capacity;

        // 1. Restore states
        let catalog: Catalog = load_state(backend.as_ref(), &keys.catalog).await;
        let cart: Cart = load_state(backend.as_ref(), &keys.cart).await;
        let preferences: Preferences = load_state(backend.as_ref(), &keys.admin_mode).await;
        info!(
            products = catalog.products().len(),
            cart_lines = cart.items().len(),
            phase = %cart.phase(),
            admin = preferences.admin_mode,
            "Snapshots restored"
        );

        // 2. Create stores
        let (catalog_actor, catalog_client) = crate::catalog_store::new(capacity, catalog);
        let (cart_actor, cart_client) = crate::cart_store::new(capacity, cart);
        let (preferences_actor, preferences_client) =
            crate::preferences_store::new(capacity, preferences);

        // 3. Start stores with their persistence hooks
        let catalog_hook: Arc<dyn StateHook<Catalog>> =
            Arc::new(PersistHook::<Catalog>::new(backend.clone(), keys.catalog.clone()));
        let cart_hook: Arc<dyn StateHook<Cart>> =
            Arc::new(PersistHook::<Cart>::new(backend.clone(), keys.cart.clone()));
        let preferences_hook: Arc<dyn StateHook<Preferences>> =
            Arc::new(PersistHook::<Preferences>::new(backend, keys.admin_mode.clone()));

        let handles = vec![
            tokio::spawn(catalog_actor.run(vec![catalog_hook])),
            tokio::spawn(cart_actor.run(vec![cart_hook])),
            tokio::spawn(preferences_actor.run(vec![preferences_hook])),
        ];

        Self {
            catalog: CatalogClient::new(catalog_client),
            cart: CartClient::new(cart_client),
            preferences: PreferencesClient::new(preferences_client),
            view: ViewState::default(),
            search_indicator: TransientFlag::new("search", config.indicators.search_debounce()),
            cart_pulse: TransientFlag::new("cart-pulse", config.indicators.cart_pulse()),
            key_prefix: config.storage.key_prefix,
            export_dir: config.exchange.export_dir,
            handles,
        }
    }

    // =========================================================================
    // Session resume
    // =========================================================================

    pub async fn resume_phase(&self) -> Result<ResumePhase, StorefrontError> {
        Ok(self.cart.phase().await?)
    }

    /// Keeps the restored cart and unlocks it.
    #[instrument(skip(self))]
    pub async fn continue_order(&self) -> Result<ResumePhase, StorefrontError> {
        Ok(self.cart.resolve(ResumeDecision::Continue).await?)
    }

    /// Drops the restored cart and its snapshot, then unlocks it.
    #[instrument(skip(self))]
    pub async fn start_fresh(&self) -> Result<ResumePhase, StorefrontError> {
        Ok(self.cart.resolve(ResumeDecision::StartFresh).await?)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    pub async fn is_admin(&self) -> Result<bool, StorefrontError> {
        Ok(self.preferences.admin_mode().await?)
    }

    pub async fn toggle_admin(&self) -> Result<bool, StorefrontError> {
        Ok(self.preferences.toggle_admin_mode().await?)
    }

    pub async fn set_admin(&self, enabled: bool) -> Result<bool, StorefrontError> {
        Ok(self.preferences.set_admin_mode(enabled).await?)
    }

    /// Creates (`id == None`) or edits a product from the admin form.
    pub async fn save_product(
        &self,
        id: Option<ProductId>,
        draft: ProductDraft,
    ) -> Result<Product, StorefrontError> {
        Ok(self.catalog.save(id, draft).await?)
    }

    /// Deletes a product. If it was open in the detail view, the view is closed.
    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, id: ProductId) -> Result<bool, StorefrontError> {
        let removed = self.catalog.remove(id.clone()).await?;
        if self.view.selected.as_ref() == Some(&id) {
            self.view.selected = None;
        }
        Ok(removed)
    }

    /// Replaces the catalog with the products in an import document.
    ///
    /// Anything but a valid array of products with unique ids is rejected and the
    /// catalog stays as it was.
    #[instrument(skip(self, document), fields(bytes = document.len()))]
    pub async fn import_catalog(&self, document: &str) -> Result<usize, StorefrontError> {
        let products = exchange::parse_catalog(document)?;
        let count = self.catalog.replace_all(products).await?;
        info!(count, "Catalog imported");
        Ok(count)
    }

    /// Writes a backup of the catalog into the export directory.
    #[instrument(skip(self))]
    pub async fn export_catalog(&self) -> Result<PathBuf, StorefrontError> {
        let products = self.catalog.products().await?;
        let path =
            exchange::write_backup(&self.export_dir, &self.key_prefix, &products, Utc::now())
                .await?;
        Ok(path)
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// Updates the search text. A non-blank query raises the "searching"
    /// indicator; a blank one lowers it at once.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.view.search = query.into();
        if self.view.search.trim().is_empty() {
            self.search_indicator.clear();
        } else {
            self.search_indicator.raise();
        }
        debug!(query = %self.view.search, "Search changed");
    }

    pub fn search(&self) -> &str {
        &self.view.search
    }

    pub fn is_searching(&self) -> bool {
        self.search_indicator.is_raised()
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        debug!(%category, "Category changed");
        self.view.category = category;
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.view.category
    }

    pub async fn categories(&self) -> Result<Vec<CategoryFilter>, StorefrontError> {
        Ok(self.catalog.categories().await?)
    }

    /// Products matching the active category and search text.
    pub async fn visible_products(&self) -> Result<Vec<Product>, StorefrontError> {
        Ok(self
            .catalog
            .filtered(self.view.category.clone(), self.view.search.clone())
            .await?)
    }

    /// Opens the detail view of a product. Unknown ids leave the view closed.
    pub async fn select(&mut self, id: ProductId) -> Result<Option<Product>, StorefrontError> {
        let product = self.catalog.product(id).await?;
        self.view.selected = product.as_ref().map(|p| p.id.clone());
        Ok(product)
    }

    pub async fn selected_product(&self) -> Result<Option<Product>, StorefrontError> {
        match &self.view.selected {
            Some(id) => Ok(self.catalog.product(id.clone()).await?),
            None => Ok(None),
        }
    }

    pub fn close_details(&mut self) {
        self.view.selected = None;
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit and pulses the cart indicator.
    pub async fn add_to_cart(&self, product: Product) -> Result<u32, StorefrontError> {
        let quantity = self.cart.add(product).await?;
        self.cart_pulse.raise();
        Ok(quantity)
    }

    pub async fn adjust_quantity(
        &self,
        id: ProductId,
        delta: i64,
    ) -> Result<Option<u32>, StorefrontError> {
        Ok(self.cart.adjust(id, delta).await?)
    }

    pub async fn remove_from_cart(&self, id: ProductId) -> Result<bool, StorefrontError> {
        Ok(self.cart.remove(id).await?)
    }

    pub async fn clear_cart(&self) -> Result<(), StorefrontError> {
        Ok(self.cart.clear().await?)
    }

    pub async fn cart_items(&self) -> Result<Vec<CartItem>, StorefrontError> {
        Ok(self.cart.items().await?)
    }

    pub async fn cart_totals(&self) -> Result<CartTotals, StorefrontError> {
        Ok(self.cart.totals().await?)
    }

    /// The structured order handed to the messaging integration at checkout.
    pub async fn order_summary(&self) -> Result<OrderSummary, StorefrontError> {
        Ok(self.cart.summary().await?)
    }

    pub fn cart_pulse_active(&self) -> bool {
        self.cart_pulse.is_raised()
    }

    // =========================================================================
    // Shutdown
    // =========================================================================

    /// Gracefully shuts down every store.
    ///
    /// # Shutdown Process
    ///
    /// Dropping the clients closes the store channels; each store drains what is
    /// already queued, runs its hooks, and exits its loop. Every write made before
    /// `shutdown` returns is therefore on the backend.
    pub async fn shutdown(self) -> Result<(), StorefrontError> {
        info!("Shutting down storefront...");

        self.search_indicator.clear();
        self.cart_pulse.clear();

        // Step 1: Close all channels by dropping clients
        drop(self.catalog);
        drop(self.cart);
        drop(self.preferences);

        // Step 2: Wait for all store tasks to complete
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
