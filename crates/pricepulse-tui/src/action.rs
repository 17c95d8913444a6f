//! All UI actions. Store snapshots come in as actions; user requests go
//! out as intents wrapped in actions.

use std::sync::Arc;

use pricepulse_core::{HomeIntent, HomeSnapshot, SearchIntent, SearchSnapshot};

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Snapshots (from the data bridge) ──────────────────────────
    HomeUpdated(Arc<HomeSnapshot>),
    SearchUpdated(Arc<SearchSnapshot>),

    // ── Requests for the stores ───────────────────────────────────
    Home(HomeIntent),
    Search(SearchIntent),

    // ── Overlays ──────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    ToggleHelp,
}
