// ── Render-ready snapshots ──
//
// Pure state: every transition is `snapshot.apply(event) -> snapshot`.
// Stores decide which event to apply and whether it is still current.

use std::sync::Arc;

use crate::model::{PriceHistory, Product, ProductDetail, ProductId, ProductResult};

/// Shown until the backend supplies its own wording.
pub const DEFAULT_DISCLAIMER: &str = "Prices are scraped from public listings and may change.";

/// Category the search flow starts with.
pub const DEFAULT_CATEGORY: &str = "All";

// ── Home flow ───────────────────────────────────────────────────────

/// The active screen. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Register,
    ProductList,
    ProductDetail(ProductId),
}

/// Everything the catalog screens need to render.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSnapshot {
    pub screen: Screen,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub products: Arc<Vec<Product>>,
    pub selected_product: Option<Arc<ProductDetail>>,
    pub price_history: Option<Arc<PriceHistory>>,
    pub disclaimer: String,
}

impl Default for HomeSnapshot {
    fn default() -> Self {
        Self {
            screen: Screen::default(),
            is_loading: false,
            error_message: None,
            products: Arc::new(Vec::new()),
            selected_product: None,
            price_history: None,
            disclaimer: DEFAULT_DISCLAIMER.to_owned(),
        }
    }
}

/// A state change in the home flow.
#[derive(Debug, Clone)]
pub enum HomeEvent {
    Navigate(Screen),
    /// An operation went in flight: loading on, error cleared.
    Started,
    ProductsLoaded(Vec<Product>),
    /// A product was opened or created.
    DetailLoaded(ProductDetail),
    HistoryLoaded(PriceHistory),
    Failed(String),
}

impl HomeSnapshot {
    pub fn apply(&self, event: HomeEvent) -> Self {
        let mut next = self.clone();
        match event {
            HomeEvent::Navigate(screen) => next.screen = screen,
            HomeEvent::Started => {
                next.is_loading = true;
                next.error_message = None;
            }
            HomeEvent::ProductsLoaded(products) => {
                next.is_loading = false;
                if let Some(disclaimer) = products
                    .first()
                    .and_then(|p| p.disclaimer.as_deref())
                    .filter(|text| !text.trim().is_empty())
                {
                    next.disclaimer = disclaimer.to_owned();
                }
                next.products = Arc::new(products);
            }
            HomeEvent::DetailLoaded(detail) => {
                next.is_loading = false;
                // History belongs to the previously selected product.
                if next
                    .price_history
                    .as_ref()
                    .is_some_and(|h| &h.product_id != detail.id())
                {
                    next.price_history = None;
                }
                next.screen = Screen::ProductDetail(detail.id().clone());
                next.disclaimer.clone_from(&detail.disclaimer);
                next.selected_product = Some(Arc::new(detail));
            }
            HomeEvent::HistoryLoaded(history) => {
                let for_selection = next
                    .selected_product
                    .as_ref()
                    .is_none_or(|d| d.id() == &history.product_id);
                if for_selection {
                    next.price_history = Some(Arc::new(history));
                }
            }
            HomeEvent::Failed(message) => {
                next.is_loading = false;
                next.error_message = Some(message);
            }
        }
        next
    }

    /// The product shown on the detail screen, if any.
    pub fn selected_id(&self) -> Option<&ProductId> {
        self.selected_product.as_deref().map(ProductDetail::id)
    }
}

// ── Search flow ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSnapshot {
    pub query: String,
    pub category: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// Kept on screen while a newer search is in flight.
    pub results: Arc<Vec<ProductResult>>,
}

impl Default for SearchSnapshot {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: DEFAULT_CATEGORY.to_owned(),
            is_loading: false,
            error_message: None,
            results: Arc::new(Vec::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SearchEvent {
    QueryChanged(String),
    CategoryChanged(String),
    Started,
    Loaded(Vec<ProductResult>),
    Failed(String),
}

impl SearchSnapshot {
    pub fn apply(&self, event: SearchEvent) -> Self {
        let mut next = self.clone();
        match event {
            SearchEvent::QueryChanged(query) => next.query = query,
            SearchEvent::CategoryChanged(category) => next.category = category,
            SearchEvent::Started => {
                next.is_loading = true;
                next.error_message = None;
            }
            SearchEvent::Loaded(results) => {
                next.is_loading = false;
                next.results = Arc::new(results);
            }
            SearchEvent::Failed(message) => {
                next.is_loading = false;
                next.error_message = Some(message);
            }
        }
        next
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn product(id: &str, disclaimer: Option<&str>) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            image_url: None,
            created_at: None,
            store_urls: BTreeMap::new(),
            disclaimer: disclaimer.map(str::to_owned),
        }
    }

    fn detail(id: &str, disclaimer: &str) -> ProductDetail {
        ProductDetail {
            product: product(id, Some(disclaimer)),
            latest_prices: Vec::new(),
            disclaimer: disclaimer.to_owned(),
        }
    }

    fn history(id: &str) -> PriceHistory {
        PriceHistory {
            product_id: ProductId::from(id),
            entries: Vec::new(),
            disclaimer: "d".into(),
        }
    }

    #[test]
    fn starts_on_login_with_default_disclaimer() {
        let snap = HomeSnapshot::default();
        assert_eq!(snap.screen, Screen::Login);
        assert!(!snap.is_loading);
        assert_eq!(snap.disclaimer, DEFAULT_DISCLAIMER);
    }

    #[test]
    fn started_clears_error() {
        let snap = HomeSnapshot::default()
            .apply(HomeEvent::Failed("boom".into()))
            .apply(HomeEvent::Started);
        assert!(snap.is_loading);
        assert!(snap.error_message.is_none());
    }

    #[test]
    fn first_product_disclaimer_wins() {
        let snap = HomeSnapshot::default().apply(HomeEvent::ProductsLoaded(vec![
            product("p1", Some("X")),
            product("p2", Some("Y")),
        ]));
        assert_eq!(snap.disclaimer, "X");
        assert_eq!(snap.products.len(), 2);
    }

    #[test]
    fn blank_or_missing_disclaimer_keeps_current() {
        let base = HomeSnapshot::default();
        let snap = base.apply(HomeEvent::ProductsLoaded(vec![product("p1", Some("  "))]));
        assert_eq!(snap.disclaimer, DEFAULT_DISCLAIMER);
        let snap = base.apply(HomeEvent::ProductsLoaded(Vec::new()));
        assert_eq!(snap.disclaimer, DEFAULT_DISCLAIMER);
    }

    #[test]
    fn failure_keeps_prior_products() {
        let snap = HomeSnapshot::default()
            .apply(HomeEvent::ProductsLoaded(vec![product("p1", None)]))
            .apply(HomeEvent::Started)
            .apply(HomeEvent::Failed("timeout".into()));
        assert_eq!(snap.products.len(), 1);
        assert!(!snap.is_loading);
        assert_eq!(snap.error_message.as_deref(), Some("timeout"));
    }

    #[test]
    fn detail_switches_screen_and_adopts_disclaimer() {
        let snap = HomeSnapshot::default()
            .apply(HomeEvent::Navigate(Screen::ProductList))
            .apply(HomeEvent::DetailLoaded(detail("p1", "Use responsibly.")));
        assert_eq!(snap.screen, Screen::ProductDetail(ProductId::from("p1")));
        assert_eq!(snap.disclaimer, "Use responsibly.");
        assert_eq!(snap.selected_id().unwrap().as_str(), "p1");
    }

    #[test]
    fn history_for_other_product_is_ignored() {
        let snap = HomeSnapshot::default()
            .apply(HomeEvent::DetailLoaded(detail("p2", "d")))
            .apply(HomeEvent::HistoryLoaded(history("p1")));
        assert!(snap.price_history.is_none());
    }

    #[test]
    fn switching_product_drops_old_history() {
        let snap = HomeSnapshot::default()
            .apply(HomeEvent::DetailLoaded(detail("p1", "d")))
            .apply(HomeEvent::HistoryLoaded(history("p1")));
        assert!(snap.price_history.is_some());

        let snap = snap.apply(HomeEvent::DetailLoaded(detail("p2", "d")));
        assert!(snap.price_history.is_none());
    }

    #[test]
    fn search_defaults_to_all_categories() {
        let snap = SearchSnapshot::default();
        assert_eq!(snap.category, "All");
        assert!(snap.results.is_empty());
    }

    #[test]
    fn search_failure_keeps_stale_results() {
        let loaded = SearchSnapshot::default().apply(SearchEvent::Loaded(
            crate::repository::demo_results(),
        ));
        let snap = loaded
            .apply(SearchEvent::QueryChanged("tv".into()))
            .apply(SearchEvent::Started);
        assert!(snap.is_loading);
        assert_eq!(snap.results.len(), 2);

        let snap = snap.apply(SearchEvent::Failed("timeout".into()));
        assert_eq!(snap.results, loaded.results);
        assert_eq!(snap.error_message.as_deref(), Some("timeout"));
    }
}
