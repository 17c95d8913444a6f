// ── Intents ──
//
// User requests the rendering layer hands to a store's `dispatch`, which
// runs them as tracked background tasks.

use crate::model::ProductId;
use crate::store::Screen;

/// Requests for [`HomeStore`](crate::HomeStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeIntent {
    Navigate(Screen),
    RefreshList,
    OpenDetail(ProductId),
    LoadHistory(ProductId),
    AddProduct {
        name: String,
        image_url: Option<String>,
        amazon_url: String,
        flipkart_url: String,
    },
}

/// Requests for [`SearchStore`](crate::SearchStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    SetQuery(String),
    SetCategory(String),
    Search,
    LoadDemoIfNeeded,
}
