// ── UI-state stores ──
//
// Each store owns one immutable snapshot in a `watch` channel and replaces
// it wholesale on every transition. Operations publish a loading snapshot,
// make at most one repository call, and publish the outcome unless a newer
// operation of the same class has started meanwhile.

mod generation;
mod home;
mod search;
mod snapshot;

pub use home::HomeStore;
pub use search::SearchStore;
pub use snapshot::{
    DEFAULT_CATEGORY, DEFAULT_DISCLAIMER, HomeEvent, HomeSnapshot, Screen, SearchEvent,
    SearchSnapshot,
};
