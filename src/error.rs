use crate::cart_store::CartError;
use crate::catalog_store::CatalogError;
use crate::config::ConfigError;
use crate::exchange::ExchangeError;
use crate::persistence::PersistenceError;
use crate::preferences_store::PreferencesError;
use thiserror::Error;

/// Any error surfaced by [`Storefront`](crate::lifecycle::Storefront).
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Preferences(#[from] PreferencesError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A store task panicked or was cancelled during shutdown.
    #[error("Store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
