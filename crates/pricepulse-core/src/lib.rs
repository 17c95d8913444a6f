//! View-state layer between `pricepulse-api` and the terminal UI.
//!
//! - **[`HomeStore`]** and **[`SearchStore`]**: own one immutable snapshot
//!   each (`tokio::sync::watch` of `Arc<Snapshot>`), expose the user-facing
//!   operations, and publish a new snapshot on every transition. Stale
//!   completions are dropped by per-operation generation counters.
//!
//! - **[`SnapshotStream<T>`]**: subscription handle vended by the stores,
//!   with `current()` / `latest()` / `changed()` and a `Stream` adapter.
//!
//! - **Repositories** ([`repository`]): [`CatalogRepository`] and
//!   [`SearchRepository`] turn API DTOs into domain types. [`SearchProvider`]
//!   serves a fixed fixture in demo mode ([`DataMode::Demo`]).
//!
//! - **Domain model** ([`model`]): products, store prices, price history,
//!   and search offers.

pub mod config;
pub mod convert;
pub mod error;
pub mod intent;
pub mod model;
pub mod repository;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, DEMO_API_KEY_SENTINEL, DataMode};
pub use error::CoreError;
pub use intent::{HomeIntent, SearchIntent};
pub use repository::{CatalogRepository, LiveCatalog, SearchProvider, SearchRepository};
pub use store::{
    DEFAULT_CATEGORY, DEFAULT_DISCLAIMER, HomeSnapshot, HomeStore, Screen, SearchSnapshot,
    SearchStore,
};
pub use stream::SnapshotStream;

pub use model::{
    NewProduct, PriceHistory, PriceSummary, Product, ProductDetail, ProductId, ProductResult,
    SearchQuery, Store, StoreOffer, StorePrice,
};
