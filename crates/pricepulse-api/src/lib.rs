// pricepulse-api: Async Rust client for the PricePulse catalog and search APIs

pub mod catalog;
pub mod error;
pub mod search;
pub mod transport;

pub use catalog::CatalogClient;
pub use catalog::models::{
    PriceHistoryResponse, ProductCreateRequest, ProductDetailResponse, ProductResponse,
    StorePriceResponse,
};
pub use error::Error;
pub use search::SearchClient;
pub use search::models::{ApiOffer, ApiPriceHistory, ApiProduct, SearchResponse};
pub use transport::TransportConfig;
