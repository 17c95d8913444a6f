// ── Domain model ──
//
// Canonical types the stores hold and the screens render. Built from the
// wire DTOs in `convert`; never sent back over the wire except `NewProduct`.

pub mod product;
pub mod search;
pub mod store;

pub use product::{NewProduct, PriceHistory, Product, ProductDetail, ProductId, StorePrice};
pub use search::{PriceSummary, ProductResult, SearchQuery, StoreOffer};
pub use store::Store;
