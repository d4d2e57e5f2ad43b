//! # Storefront
//!
//! > **The state core of a small online shop: catalog, cart and the session that ties them together.**
//!
//! Every piece of shop state lives in its own store: a Tokio task that owns the data,
//! applies commands one at a time, and writes a JSON snapshot after each change.
//! The UI layer never touches the data directly; it talks to typed clients.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why one store per concern?
//!
//! - **Catalog**: ordered products, new ones first, unique by id.
//! - **Cart**: merged lines with quantities, locked behind a resume decision after restart.
//! - **Preferences**: the persisted admin-mode flag.
//!
//! Each store is the single writer of its own state, so there are no locks around the
//! data and no way for two call sites to race on it.
//!
//! ### Mutate, then persist
//!
//! Persistence is not sprinkled over call sites. A [`PersistHook`](persistence::PersistHook)
//! is registered on every store and runs after each state-changing command, before the
//! caller gets its answer. Swap the [`SnapshotBackend`](persistence::SnapshotBackend)
//! to move the data from files to memory (tests) or anywhere else.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: The Power of `S`
//! You'll see `StoreActor<S: StoreState>` everywhere. The message loop, the client, the
//! hooks and the mocks are written **once** and work for the catalog, the cart and the
//! preferences alike.
//!
//! ### Mocking: Testing without Pain
//! Clients can be tested without a running store. See the [`framework::mock`] module.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each store defines its own error type ([`CatalogError`](catalog_store::CatalogError),
//! [`CartError`](cart_store::CartError), ...). A rejected command travels through the
//! framework boxed and comes back out of the client as the original domain error.
//! [`StorefrontError`] gathers them all with `#[from]` conversions.
//!
//! ### 2. Hook Injection
//! Hooks are passed to `run()`, not to the constructor, so the same store is wired to a
//! file backend in the app and to an in-memory one in tests.
//!
//! ### 3. Concurrency Model
//! Each `StoreActor` runs in its own Tokio task and processes messages sequentially.
//! Different stores run in parallel.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `StoreActor<S>`, `StoreClient<S>` and `StateHook<S>`.
//! - **Key items**: [`StoreState`](framework::StoreState), [`StoreActor`](framework::StoreActor).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! Restores snapshots, starts the stores with their hooks and owns the view state.
//! - **Key items**: [`Storefront`](lifecycle::Storefront), [`shutdown`](lifecycle::Storefront::shutdown).
//!
//! ### 3. The Interface ([`clients`])
//! Domain methods over the raw command/query channel.
//! - **Key items**: [`CatalogClient`](clients::CatalogClient), [`CartClient`](clients::CartClient).
//!
//! ### 4. The Stores ([`catalog_store`], [`cart_store`], [`preferences_store`])
//! Concrete `StoreState` implementations holding the business rules.
//!
//! ### 5. The Edges ([`persistence`], [`exchange`], [`config`])
//! Snapshot backends, JSON import/export of the catalog, and TOML configuration.
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Run with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cart_store;
pub mod catalog_store;
pub mod clients;
pub mod config;
pub mod error;
pub mod exchange;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod persistence;
pub mod preferences_store;
pub mod transient;

pub use error::StorefrontError;
