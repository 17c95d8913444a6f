// ── API-to-domain type conversions ──
//
// Bridges raw `pricepulse_api` response types into `pricepulse_core::model`
// types. Each `From` impl renames and regroups fields and parses timestamp
// strings; none of them carries business rules.

use chrono::{DateTime, NaiveDateTime, Utc};

use pricepulse_api::{
    ApiOffer, ApiPriceHistory, ApiProduct, PriceHistoryResponse, ProductCreateRequest,
    ProductDetailResponse, ProductResponse, StorePriceResponse,
};

use crate::model::{
    NewProduct, PriceHistory, PriceSummary, Product, ProductDetail, ProductId, ProductResult,
    StoreOffer, StorePrice,
};
use crate::store::DEFAULT_DISCLAIMER;

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a backend timestamp. The backend emits naive UTC
/// (`2024-06-15T10:30:00`, optionally with fractional seconds); RFC 3339
/// with an offset is accepted too. Anything else is dropped.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

// ── Catalog ────────────────────────────────────────────────────────

impl From<ProductResponse> for Product {
    fn from(p: ProductResponse) -> Self {
        Self {
            id: ProductId::from(p.id),
            name: p.name,
            image_url: p.image_url.filter(|url| !url.is_empty()),
            created_at: parse_timestamp(&p.created_at),
            store_urls: p.store_urls.unwrap_or_default().into_iter().collect(),
            disclaimer: p.disclaimer,
        }
    }
}

impl From<StorePriceResponse> for StorePrice {
    fn from(p: StorePriceResponse) -> Self {
        Self {
            id: p.id,
            product_id: ProductId::from(p.product_id),
            store: p.store,
            price: p.price,
            product_url: p.product_url,
            fetched_at: parse_timestamp(&p.fetched_at),
        }
    }
}

impl From<ProductDetailResponse> for ProductDetail {
    fn from(d: ProductDetailResponse) -> Self {
        let product = Product::from(d.product);
        let disclaimer = product
            .disclaimer
            .clone()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISCLAIMER.to_owned());
        Self {
            product,
            latest_prices: d.latest_prices.into_iter().map(StorePrice::from).collect(),
            disclaimer,
        }
    }
}

impl From<PriceHistoryResponse> for PriceHistory {
    fn from(h: PriceHistoryResponse) -> Self {
        Self {
            product_id: ProductId::from(h.product_id),
            entries: h.history.into_iter().map(StorePrice::from).collect(),
            disclaimer: h.disclaimer,
        }
    }
}

impl From<NewProduct> for ProductCreateRequest {
    fn from(p: NewProduct) -> Self {
        Self {
            name: p.name,
            image_url: p.image_url,
            store_urls: p.store_urls.into_iter().collect(),
        }
    }
}

// ── Search ─────────────────────────────────────────────────────────

impl From<ApiOffer> for StoreOffer {
    fn from(o: ApiOffer) -> Self {
        Self {
            store: o.store,
            price: o.price,
            shipping: o.shipping,
            offer: o.offer,
            deep_link: o.deep_link,
        }
    }
}

impl From<ApiPriceHistory> for PriceSummary {
    fn from(h: ApiPriceHistory) -> Self {
        Self {
            current: h.current,
            lowest_30d: h.lowest_30d,
        }
    }
}

impl From<ApiProduct> for ProductResult {
    fn from(p: ApiProduct) -> Self {
        Self {
            id: p.id,
            title: p.title,
            image_url: p.image_url,
            offers: p.offers.into_iter().map(StoreOffer::from).collect(),
            price_history: p.price_history.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Datelike, Timelike};

    use super::*;

    fn product_response(disclaimer: Option<&str>) -> ProductResponse {
        ProductResponse {
            id: "p1".into(),
            name: "Sony WH-1000XM5".into(),
            image_url: Some(String::new()),
            created_at: "2024-06-15T10:30:00".into(),
            store_urls: Some(HashMap::from([(
                "amazon".to_owned(),
                "https://amazon.example/p1".to_owned(),
            )])),
            disclaimer: disclaimer.map(str::to_owned),
        }
    }

    #[test]
    fn naive_timestamp_is_utc() {
        let dt = parse_timestamp("2024-06-15T10:30:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 6, 15));
        assert_eq!((dt.hour(), dt.minute()), (10, 30));
    }

    #[test]
    fn fractional_and_offset_timestamps_parse() {
        assert!(parse_timestamp("2024-06-15T10:30:00.123456").is_some());
        let dt = parse_timestamp("2024-06-15T16:00:00+05:30").unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn garbage_timestamp_is_none() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn product_drops_empty_image_and_keeps_urls() {
        let product = Product::from(product_response(None));
        assert_eq!(product.id.as_str(), "p1");
        assert!(product.image_url.is_none());
        assert!(product.created_at.is_some());
        assert_eq!(product.store_count(), 1);
        assert_eq!(
            product.store_url(crate::model::Store::Amazon),
            Some("https://amazon.example/p1")
        );
    }

    #[test]
    fn detail_disclaimer_defaults_when_missing() {
        let detail = ProductDetail::from(ProductDetailResponse {
            product: product_response(None),
            latest_prices: Vec::new(),
        });
        assert_eq!(detail.disclaimer, DEFAULT_DISCLAIMER);

        let detail = ProductDetail::from(ProductDetailResponse {
            product: product_response(Some("Use responsibly.")),
            latest_prices: Vec::new(),
        });
        assert_eq!(detail.disclaimer, "Use responsibly.");
    }

    #[test]
    fn new_product_becomes_create_request() {
        let req = ProductCreateRequest::from(NewProduct::new(
            "Shoe",
            None,
            "https://amazon/x",
            "https://flipkart/y",
        ));
        assert_eq!(req.name, "Shoe");
        assert_eq!(req.store_urls.get("flipkart").unwrap(), "https://flipkart/y");
    }

    #[test]
    fn search_product_regroups_offers() {
        let result = ProductResult::from(ApiProduct {
            id: "sony-xm5".into(),
            title: "Sony".into(),
            image_url: "https://example.com/images/sony-xm5.png".into(),
            offers: vec![ApiOffer {
                store: "Amazon".into(),
                price: "₹24,990".into(),
                shipping: "₹0".into(),
                offer: "-₹2,000".into(),
                deep_link: "https://www.amazon.in/".into(),
            }],
            price_history: ApiPriceHistory {
                current: "₹23,990".into(),
                lowest_30d: "₹22,500".into(),
            },
        });
        assert_eq!(result.offers[0].deep_link, "https://www.amazon.in/");
        assert_eq!(result.price_history.lowest_30d, "₹22,500");
    }
}
