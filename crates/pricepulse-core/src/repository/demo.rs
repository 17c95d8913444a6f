// Built-in search fixture served when no API key is configured.

use crate::model::{PriceSummary, ProductResult, StoreOffer};

fn offer(store: &str, price: &str, shipping: &str, discount: &str, deep_link: &str) -> StoreOffer {
    StoreOffer {
        store: store.to_owned(),
        price: price.to_owned(),
        shipping: shipping.to_owned(),
        offer: discount.to_owned(),
        deep_link: deep_link.to_owned(),
    }
}

/// The two fixed demo products. Identical on every call, whatever the query.
pub fn demo_results() -> Vec<ProductResult> {
    vec![
        ProductResult {
            id: "sony-xm5".into(),
            title: "Sony WH-1000XM5 Wireless Noise Cancelling Headphones".into(),
            image_url: "https://example.com/images/sony-xm5.png".into(),
            offers: vec![
                offer("Amazon", "₹24,990", "₹0", "-₹2,000", "https://www.amazon.in/"),
                offer("Flipkart", "₹25,499", "₹120", "-₹1,500", "https://www.flipkart.com/"),
            ],
            price_history: PriceSummary {
                current: "₹23,990".into(),
                lowest_30d: "₹22,500".into(),
            },
        },
        ProductResult {
            id: "nike-pegasus-40".into(),
            title: "Nike Pegasus 40 Running Shoes".into(),
            image_url: "https://example.com/images/nike-pegasus-40.png".into(),
            offers: vec![
                offer("Amazon", "₹8,999", "₹0", "-₹500", "https://www.amazon.in/"),
                offer("Myntra", "₹9,250", "₹80", "-₹750", "https://www.myntra.com/"),
            ],
            price_history: PriceSummary {
                current: "₹8,499".into(),
                lowest_30d: "₹7,999".into(),
            },
        },
    ]
}
