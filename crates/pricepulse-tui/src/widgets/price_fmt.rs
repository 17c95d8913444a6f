//! Price and timestamp formatting helpers.

use chrono::{DateTime, Utc};

/// Rupee price with two decimals, e.g. "₹24990.00".
pub fn fmt_price(price: f64) -> String {
    format!("₹{price:.2}")
}

/// Date only, e.g. "12 Mar 2025". Unparsed timestamps show as "unknown".
pub fn fmt_date(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "unknown".into(), |t| t.format("%d %b %Y").to_string())
}

/// Date and minute, e.g. "12 Mar 2025 09:30 UTC".
pub fn fmt_timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(
        || "unknown".into(),
        |t| t.format("%d %b %Y %H:%M UTC").to_string(),
    )
}

/// "1 store" / "3 stores".
pub fn fmt_store_count(count: usize) -> String {
    if count == 1 {
        "1 store".into()
    } else {
        format!("{count} stores")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn price_keeps_two_decimals() {
        assert_eq!(fmt_price(24990.0), "₹24990.00");
        assert_eq!(fmt_price(799.5), "₹799.50");
    }

    #[test]
    fn timestamps_render_in_utc() {
        let at = Utc.with_ymd_and_hms(2025, 3, 12, 9, 30, 5).unwrap();
        assert_eq!(fmt_date(Some(at)), "12 Mar 2025");
        assert_eq!(fmt_timestamp(Some(at)), "12 Mar 2025 09:30 UTC");
        assert_eq!(fmt_date(None), "unknown");
    }

    #[test]
    fn store_count_pluralizes() {
        assert_eq!(fmt_store_count(1), "1 store");
        assert_eq!(fmt_store_count(2), "2 stores");
        assert_eq!(fmt_store_count(0), "0 stores");
    }
}
