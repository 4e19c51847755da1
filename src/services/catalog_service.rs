use std::time::Duration;

use moka::future::Cache;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, StatusCode,
};
use secrecy::ExposeSecret;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::tobacco::{CatalogPage, Tobacco};

pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const MAX_SEARCH_LIMIT: u32 = 50;
const CACHE_CAPACITY: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SearchKey {
    query: String,
    page: u32,
    limit: u32,
}

/// Client for the external tobacco catalog, with a TTL response cache.
#[derive(Clone)]
pub struct CatalogService {
    client: Client,
    base_url: String,
    search_cache: Cache<SearchKey, CatalogPage>,
    tobacco_cache: Cache<String, Tobacco>,
}

impl CatalogService {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.catalog_api_key {
            let mut value = HeaderValue::from_str(api_key.expose_secret())
                .map_err(|_| Error::Config("CATALOG_API_KEY is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert("x-api-key", value);
        }

        let client = Client::builder()
            .timeout(config.catalog_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(
            client,
            config.catalog_api_url.clone(),
            config.catalog_cache_ttl,
        ))
    }

    pub fn with_client(client: Client, base_url: String, cache_ttl: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            search_cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(cache_ttl)
                .build(),
            tobacco_cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(cache_ttl)
                .build(),
        }
    }

    /// Returns the page together with the limit that was actually applied.
    pub async fn search(
        &self,
        query: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<(CatalogPage, u32)> {
        let query = normalize_query(query)?;
        let page = page.unwrap_or(1).max(1);
        let limit = limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);

        let key = SearchKey {
            query: query.to_lowercase(),
            page,
            limit,
        };
        if let Some(hit) = self.search_cache.get(&key).await {
            tracing::debug!(query = %key.query, page, limit, "Catalog search cache hit");
            return Ok((hit, limit));
        }

        let url = format!("{}/tobaccos", self.base_url);
        tracing::info!(query = %query, page, limit, "Searching tobacco catalog");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("search", query.clone()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Catalog search failed");
            return Err(Error::Upstream(format!(
                "Catalog search returned {}",
                response.status()
            )));
        }

        let result = response.json::<CatalogPage>().await?;
        self.search_cache.insert(key, result.clone()).await;
        Ok((result, limit))
    }

    pub async fn get_tobacco(&self, id: &str) -> Result<Tobacco> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::BadRequest("Tobacco id must not be blank".into()));
        }
        if let Some(hit) = self.tobacco_cache.get(id).await {
            return Ok(hit);
        }

        let url = format!("{}/tobaccos/{}", self.base_url, urlencoding::encode(id));
        tracing::info!("Fetching tobacco details from: {}", url);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(format!("Tobacco {} not found", id))),
            status if !status.is_success() => {
                tracing::warn!(%status, tobacco_id = id, "Catalog lookup failed");
                Err(Error::Upstream(format!("Catalog lookup returned {}", status)))
            }
            _ => {
                let tobacco = response.json::<Tobacco>().await?;
                self.tobacco_cache.insert(id.to_string(), tobacco.clone()).await;
                Ok(tobacco)
            }
        }
    }
}

pub fn normalize_query(query: &str) -> Result<String> {
    let query = query.split_whitespace().collect::<Vec<_>>().join(" ");
    if query.is_empty() {
        return Err(Error::BadRequest("Search query must not be empty".into()));
    }
    if query.chars().count() > 100 {
        return Err(Error::BadRequest("Search query is too long".into()));
    }
    Ok(query)
}
