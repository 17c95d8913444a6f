// ── Repositories ──
//
// The seams between the stores and the network. Each trait method is one
// API round trip translated into domain types; failures are collapsed into
// `CoreError` here so the stores only ever see one error type.

mod catalog;
mod demo;
mod search;

use std::future::Future;

use crate::error::CoreError;
use crate::model::{
    NewProduct, PriceHistory, Product, ProductDetail, ProductId, ProductResult, SearchQuery,
};

pub use catalog::LiveCatalog;
pub use demo::demo_results;
pub use search::SearchProvider;

/// Product tracking operations backing the home flow.
pub trait CatalogRepository: Send + Sync + 'static {
    fn load_products(&self) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;

    fn load_product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<ProductDetail, CoreError>> + Send;

    fn load_history(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<PriceHistory, CoreError>> + Send;

    fn add_product(
        &self,
        product: NewProduct,
    ) -> impl Future<Output = Result<ProductDetail, CoreError>> + Send;
}

/// Offer search backing the search flow.
pub trait SearchRepository: Send + Sync + 'static {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<ProductResult>, CoreError>> + Send;
}
