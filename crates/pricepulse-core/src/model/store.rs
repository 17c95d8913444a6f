// ── Store identifiers ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// An e-commerce store PricePulse knows how to compare.
///
/// Parses case-insensitively (`"Amazon"`, `"amazon"`). Prices from stores
/// outside this list still flow through as plain strings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Store {
    Amazon,
    Flipkart,
    Myntra,
}

impl Store {
    /// Every known store, in display order.
    pub fn all() -> Vec<Store> {
        Self::iter().collect()
    }

    /// Human-facing name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::Flipkart => "Flipkart",
            Self::Myntra => "Myntra",
        }
    }
}
