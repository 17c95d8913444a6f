// Search API HTTP client
//
// Auth: X-API-KEY header, injected as a sensitive default header so it
// never shows up in debug output.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use super::models::SearchResponse;
use crate::catalog::client::normalize_base_url;
use crate::error::Error;
use crate::transport::{TransportConfig, decode_response};

const API_KEY_HEADER: &str = "X-API-KEY";

/// Async client for the keyed product search API.
pub struct SearchClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SearchClient {
    /// Build from an API key and transport config.
    ///
    /// Injects `X-API-KEY` as a default header on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::InvalidApiKey {
                message: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);

        let http = transport.build_client_with_headers(headers)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// `GET /search?q=&category=&stores=` — offers for products matching
    /// `query`, restricted to `stores` (comma-joined on the wire).
    pub async fn search(
        &self,
        query: &str,
        category: &str,
        stores: &[&str],
    ) -> Result<SearchResponse, Error> {
        let url = self.base_url.join("search")?;
        let params = [
            ("q", query.to_owned()),
            ("category", category.to_owned()),
            ("stores", stores.join(",")),
        ];
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(&params).send().await?;
        decode_response(resp).await
    }
}
