//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for the whole storefront.
//!
//! ## Configuration
//!
//! Log levels come from `RUST_LOG`. The compact format hides the module prefix
//! (`with_target(false)`); every store event carries a `store` field instead.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: start (with restored size and hook count) and shutdown
//! - **Commands and Queries**: `debug` with the full payload
//! - **Mutations**: `info` with the resulting size and whether the snapshot is
//!   written or erased
//! - **Rejections**: `warn` with the domain error (e.g. a locked cart)
//! - **Persistence**: `warn` when a snapshot cannot be read, parsed or written
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle and mutations only
//! RUST_LOG=info cargo run
//!
//! # Full payloads of every command and query
//! RUST_LOG=debug cargo run
//!
//! # Indicator timers as well
//! RUST_LOG=trace cargo run
//!
//! # Only the persistence layer
//! RUST_LOG=storefront::persistence=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a shopper adding the same product twice looks like:
//!
//! ```text
//! DEBUG add: Sending command store="cart" command=Add(Product { id: "17", .. })
//! DEBUG Apply store="cart" command=Add(Product { id: "17", .. })
//!  INFO Applied store="cart" change=Modified size=1
//! DEBUG Snapshot persisted store="cart" key=storefront-cart change=Modified
//! DEBUG add: Sending command store="cart" command=Add(Product { id: "17", .. })
//!  INFO Applied store="cart" change=Modified size=1
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // The `store` field already says where an event comes from
        .compact()
        .init();
}
