// Catalog API wire types
//
// Field names and optionality follow the backend's JSON exactly. Timestamps
// stay as strings here; `pricepulse-core` parses them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A tracked product, as returned by `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: String,
    /// Store name -> product page URL.
    #[serde(default)]
    pub store_urls: Option<HashMap<String, String>>,
    #[serde(default)]
    pub disclaimer: Option<String>,
}

/// A product plus its latest price per store (`GET /products/{id}`, `POST /products`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    #[serde(default)]
    pub latest_prices: Vec<StorePriceResponse>,
}

/// One scraped price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePriceResponse {
    pub id: i64,
    pub product_id: String,
    pub store: String,
    pub price: f64,
    pub product_url: String,
    pub fetched_at: String,
}

/// All price observations for a product, newest first (`GET /products/{id}/prices`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryResponse {
    pub product_id: String,
    #[serde(default)]
    pub history: Vec<StorePriceResponse>,
    pub disclaimer: String,
}

/// Request body for `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreateRequest {
    pub name: String,
    pub image_url: Option<String>,
    pub store_urls: HashMap<String, String>,
}
