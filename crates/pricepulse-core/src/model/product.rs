// ── Catalog domain types ──
//
// Products tracked by the PricePulse backend and the prices it scraped for
// them. Prices are numeric rupee amounts here, unlike the search flow.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::store::Store;

// ── ProductId ───────────────────────────────────────────────────────

/// Server-assigned product identifier (a UUID string on the current backend,
/// treated as opaque).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Product ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image_url: Option<String>,
    /// `None` when the server sent a timestamp we could not parse.
    pub created_at: Option<DateTime<Utc>>,
    /// Store name -> product page URL, ordered by store name.
    pub store_urls: BTreeMap<String, String>,
    pub disclaimer: Option<String>,
}

impl Product {
    pub fn store_count(&self) -> usize {
        self.store_urls.len()
    }

    pub fn store_url(&self, store: Store) -> Option<&str> {
        self.store_urls.get(store.as_ref()).map(String::as_str)
    }
}

// ── StorePrice ──────────────────────────────────────────────────────

/// One scraped price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePrice {
    pub id: i64,
    pub product_id: ProductId,
    pub store: String,
    pub price: f64,
    pub product_url: String,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl StorePrice {
    /// The store as a known identifier, if it is one.
    pub fn known_store(&self) -> Option<Store> {
        self.store.parse().ok()
    }
}

// ── ProductDetail ───────────────────────────────────────────────────

/// A product with its most recent price from each store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub latest_prices: Vec<StorePrice>,
    pub disclaimer: String,
}

impl ProductDetail {
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    pub fn name(&self) -> &str {
        &self.product.name
    }

    /// The cheapest latest price across stores.
    pub fn best_price(&self) -> Option<&StorePrice> {
        self.latest_prices
            .iter()
            .min_by(|a, b| a.price.total_cmp(&b.price))
    }

    /// Whether `price` ties the cheapest latest price.
    pub fn is_best(&self, price: &StorePrice) -> bool {
        self.best_price()
            .is_some_and(|best| best.price.total_cmp(&price.price).is_eq())
    }
}

// ── PriceHistory ────────────────────────────────────────────────────

/// Every observation for one product, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub product_id: ProductId,
    pub entries: Vec<StorePrice>,
    pub disclaimer: String,
}

impl PriceHistory {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lowest(&self) -> Option<&StorePrice> {
        self.entries.iter().min_by(|a, b| a.price.total_cmp(&b.price))
    }
}

// ── NewProduct ──────────────────────────────────────────────────────

/// A request to start tracking a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub image_url: Option<String>,
    pub store_urls: BTreeMap<String, String>,
}

impl NewProduct {
    /// Build the request the add-product form submits: an Amazon and a
    /// Flipkart URL, with a blank image URL treated as absent.
    pub fn new(
        name: impl Into<String>,
        image_url: Option<String>,
        amazon_url: impl Into<String>,
        flipkart_url: impl Into<String>,
    ) -> Self {
        let store_urls = BTreeMap::from([
            (Store::Amazon.to_string(), amazon_url.into()),
            (Store::Flipkart.to_string(), flipkart_url.into()),
        ]);
        Self {
            name: name.into(),
            image_url: image_url.filter(|url| !url.trim().is_empty()),
            store_urls,
        }
    }
}
