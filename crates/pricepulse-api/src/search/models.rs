// Search API wire types
//
// Prices in this API are display strings already formatted by the
// provider (e.g. "₹24,990"), not numbers.

use serde::{Deserialize, Serialize};

/// Response of `GET /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<ApiProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiProduct {
    pub id: String,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub offers: Vec<ApiOffer>,
    pub price_history: ApiPriceHistory,
}

/// One store's offer for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiOffer {
    pub store: String,
    pub price: String,
    pub shipping: String,
    pub offer: String,
    pub deep_link: String,
}

/// Two-point price summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPriceHistory {
    pub current: String,
    pub lowest_30d: String,
}
