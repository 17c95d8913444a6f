// ── Search domain types ──
//
// Offers returned by the keyed search API. Prices are display strings
// formatted by the provider (e.g. "₹24,990") and are never parsed.

use serde::{Deserialize, Serialize};

/// What the user is searching for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub category: String,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOffer {
    pub store: String,
    pub price: String,
    pub shipping: String,
    /// Promotional discount, e.g. "-₹2,000".
    pub offer: String,
    pub deep_link: String,
}

/// Two-point price summary: today and the 30-day low.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub current: String,
    pub lowest_30d: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResult {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub offers: Vec<StoreOffer>,
    pub price_history: PriceSummary,
}
