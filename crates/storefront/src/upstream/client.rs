//! HTTP client for the upstream commerce API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use lumina_core::Category;

use super::detail::{self, ProductDetail};
use super::types::{CategoryTreeEnvelope, DetailEnvelope, ListingEnvelope};
use super::UpstreamError;
use crate::categories::transform_tree;

/// Browser-like UA sent on image fetches; some CDNs reject the default.
const IMAGE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Cached value types.
#[derive(Clone)]
enum CacheValue {
    Categories(Arc<Vec<Category>>),
    Detail(Arc<ProductDetail>),
}

/// Client for the upstream commerce API.
///
/// Stateless request/response transformation plus a small read cache:
/// the category tree and product details are cached for 5 minutes, listing
/// and search pages are always fetched fresh.
#[derive(Clone)]
pub struct UpstreamClient {
    inner: Arc<UpstreamClientInner>,
}

struct UpstreamClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl UpstreamClient {
    /// Create a new upstream client for the given base URL.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(UpstreamClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Check the status and parse the body of an upstream response.
    ///
    /// The body is read as text first so a non-success status or a parse
    /// failure can be logged with what the upstream actually sent.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, UpstreamError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Upstream API returned non-success status"
            );
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse upstream response"
            );
            UpstreamError::Parse(e)
        })
    }

    /// Fetch one page of the product listing, optionally scoped to a
    /// category.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success upstream
    /// status, or an unparseable body. Never retries.
    #[instrument(skip(self))]
    pub async fn product_page(
        &self,
        page: u32,
        limit: u32,
        category_id: Option<&str>,
    ) -> Result<ListingEnvelope, UpstreamError> {
        let mut url = format!(
            "{}/v2_0_0-products/get-product-main-info?page={page}&limit={limit}",
            self.inner.base_url
        );
        if let Some(category_id) = category_id {
            url.push_str("&category_id=");
            url.push_str(&urlencoding::encode(category_id));
        }

        debug!(url = %url, "Proxying product listing request");
        let response = self.inner.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    /// Run a keyword search. The envelope is passed through verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success upstream
    /// status (carrying the upstream status code so the proxy can mirror it).
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        keyword: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Value, UpstreamError> {
        let url = format!(
            "{}/v2_0_0-search/search?keyword={}&page={page}&page_size={page_size}",
            self.inner.base_url,
            urlencoding::encode(keyword)
        );

        let response = self.inner.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    /// Fetch and transform the category tree. Cached for 5 minutes.
    ///
    /// # Errors
    ///
    /// Returns an error when the upstream call fails; callers are expected
    /// to fall back to the hardcoded tree.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>, UpstreamError> {
        let cache_key = "categories:tree".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category tree");
            return Ok(categories);
        }

        let url = format!("{}/v2_0_0-category/tree", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let envelope: CategoryTreeEnvelope = Self::read_json(response).await?;

        let categories = Arc::new(transform_tree(&envelope.tree));
        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(Arc::clone(&categories)))
            .await;
        Ok(categories)
    }

    /// Fetch normalized product details plus variants. Cached for 5 minutes.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the upstream reports no such product, or an
    /// error on transport/status/parse failure.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn product_detail(
        &self,
        product_id: &str,
    ) -> Result<Arc<ProductDetail>, UpstreamError> {
        let cache_key = format!("detail:{product_id}");

        if let Some(CacheValue::Detail(detail)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product detail");
            return Ok(detail);
        }

        let url = format!(
            "{}/v2_0_0-products/get-product-details-with-variants",
            self.inner.base_url
        );
        let response = self
            .inner
            .client
            .post(&url)
            .form(&[("product_id", product_id)])
            .send()
            .await?;
        let envelope: DetailEnvelope = Self::read_json(response).await?;

        let detail = Arc::new(detail::normalize_detail(product_id, envelope)?);
        self.inner
            .cache
            .insert(cache_key, CacheValue::Detail(Arc::clone(&detail)))
            .await;
        Ok(detail)
    }

    /// Fetch an external image for the image proxy. Returns the raw
    /// response so the route can stream the body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn fetch_image(&self, url: &str) -> Result<reqwest::Response, UpstreamError> {
        let response = self
            .inner
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, IMAGE_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: "Failed to fetch image".to_string(),
            });
        }
        Ok(response)
    }
}
