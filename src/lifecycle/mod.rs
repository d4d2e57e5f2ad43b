//! Starting, wiring and stopping the stores.

pub mod storefront;
pub mod tracing;

pub use self::storefront::Storefront;
pub use self::tracing::setup_tracing;
