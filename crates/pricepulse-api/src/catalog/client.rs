// Catalog API HTTP client
//
// Wraps `reqwest::Client` with URL construction and response decoding for
// the product tracking endpoints. Every method is exactly one round trip.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::models::{
    PriceHistoryResponse, ProductCreateRequest, ProductDetailResponse, ProductResponse,
};
use crate::error::Error;
use crate::transport::{TransportConfig, decode_response};

/// Async client for the product catalog API (`/products`).
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a new catalog client from a `TransportConfig`.
    ///
    /// `base_url` is the API root (e.g. `http://127.0.0.1:8000/`); a missing
    /// trailing slash is added so relative paths join underneath it.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /products` — every tracked product.
    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, Error> {
        self.get("products").await
    }

    /// `GET /products/{id}` — one product with its latest price per store.
    pub async fn get_product(&self, id: &str) -> Result<ProductDetailResponse, Error> {
        let url = self.product_url(id, None)?;
        self.get_url(url).await
    }

    /// `GET /products/{id}/prices` — full price history, newest first.
    pub async fn get_price_history(&self, id: &str) -> Result<PriceHistoryResponse, Error> {
        let url = self.product_url(id, Some("prices"))?;
        self.get_url(url).await
    }

    /// `POST /products` — start tracking a product. The server scrapes the
    /// given store URLs before responding.
    pub async fn create_product(
        &self,
        request: &ProductCreateRequest,
    ) -> Result<ProductDetailResponse, Error> {
        self.post("products", request).await
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// `products/{id}[/{suffix}]` with the id percent-encoded as one segment.
    fn product_url(&self, id: &str, suffix: Option<&str>) -> Result<Url, Error> {
        let mut url = self.url("products")?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.push(id);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        self.get_url(url).await
    }

    async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        decode_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        decode_response(resp).await
    }
}

/// Ensure the base URL ends with `/` so `join` appends rather than replaces.
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::with_client(base, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let c = client("http://localhost:8000/api");
        assert_eq!(c.base_url().as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn product_urls_nest_under_base_path() {
        let c = client("http://localhost:8000/api/");
        let url = c.product_url("abc-123", Some("prices")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/products/abc-123/prices");
    }

    #[test]
    fn product_id_is_percent_encoded() {
        let c = client("http://localhost:8000/");
        let url = c.product_url("a/b c", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/products/a%2Fb%20c");
    }
}
