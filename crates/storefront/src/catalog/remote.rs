//! Catalog provider backed by a remote JSON backend.
//!
//! Translates [`FilterSpec`] to query parameters, preserving the exact
//! predicate semantics of the in-process filter engine. Product and list
//! lookups are cached with `moka` (5-minute TTL). Concurrent identical
//! fetches are not deduplicated, and there are no retries: a failed fetch
//! surfaces immediately to the caller.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use timepiece_core::ProductId;
use tracing::{debug, instrument};

use super::{CatalogError, CatalogFacets, FilterSpec, Product};
use crate::config::BackendConfig;

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Product(ProductId),
    List(String),
    Facets,
}

/// Cached value types.
#[derive(Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Facets(CatalogFacets),
}

/// Client for the remote catalog backend.
#[derive(Clone)]
pub struct RemoteCatalog {
    inner: Arc<RemoteCatalogInner>,
}

struct RemoteCatalogInner {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl RemoteCatalog {
    /// Create a new remote catalog client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(RemoteCatalogInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
                cache,
            }),
        }
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .inner
            .client
            .get(format!("{}{path}", self.inner.base_url));
        if let Some(key) = &self.inner.api_key {
            builder = builder.header("X-Api-Key", key.expose_secret());
        }
        builder
    }

    async fn fetch_products(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Product>, CatalogError> {
        let response = self.request(path).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Backend(status));
        }
        Ok(response.json().await?)
    }

    /// List watches matching a filter specification.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or responds with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn list(&self, spec: &FilterSpec) -> Result<Vec<Product>, CatalogError> {
        let query = filter_query(spec);
        let key = CacheKey::List(canonical_query("/watches", &query));
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!("catalog list served from cache");
            return Ok(products);
        }

        let products = self.fetch_products("/watches", &query).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch a single watch by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("catalog product served from cache");
            return Ok(*product);
        }

        let response = self.request(&format!("/watches/{id}")).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            return Err(CatalogError::Backend(status));
        }
        let product: Product = response.json().await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// The `limit` highest-priced watches.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable.
    #[instrument(skip(self))]
    pub async fn featured(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        let query = [("limit", limit.to_string())];
        let key = CacheKey::List(canonical_query("/watches/featured", &query));
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            return Ok(products);
        }

        let products = self.fetch_products("/watches/featured", &query).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Up to `limit` watches related to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids.
    #[instrument(skip(self))]
    pub async fn related(&self, id: ProductId, limit: usize) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .request(&format!("/watches/{id}/related"))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            return Err(CatalogError::Backend(status));
        }
        Ok(response.json().await?)
    }

    /// Free-text search including descriptions. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let term = query.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_products("/watches/search", &[("q", term.to_string())])
            .await
    }

    /// Facet data for filter sidebars.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable.
    #[instrument(skip(self))]
    pub async fn facets(&self) -> Result<CatalogFacets, CatalogError> {
        if let Some(CacheValue::Facets(facets)) = self.inner.cache.get(&CacheKey::Facets).await {
            return Ok(facets);
        }

        let response = self.request("/watches/facets").send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Backend(status));
        }
        let facets: CatalogFacets = response.json().await?;
        self.inner
            .cache
            .insert(CacheKey::Facets, CacheValue::Facets(facets.clone()))
            .await;
        Ok(facets)
    }
}

/// Translate a filter specification to backend query parameters.
///
/// Inactive dimensions are omitted entirely so the backend applies no
/// constraint for them, mirroring the in-process predicate semantics.
fn filter_query(spec: &FilterSpec) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if !spec.categories.is_empty() {
        let csv = spec
            .categories
            .iter()
            .map(|c| c.as_str().to_string())
            .collect::<Vec<_>>()
            .join(",");
        query.push(("categories", csv));
    }
    if !spec.brands.is_empty() {
        query.push(("brands", spec.brands.join(",")));
    }
    if let Some(range) = spec.price_range {
        query.push(("min_price", range.min.amount().to_string()));
        query.push(("max_price", range.max.amount().to_string()));
    }
    if let Some(term) = spec.search.as_deref() {
        let term = term.trim();
        if !term.is_empty() {
            query.push(("search", term.to_string()));
        }
    }
    query
}

/// Canonical cache key string for a path plus query parameters.
fn canonical_query(path: &str, query: &[(&str, String)]) -> String {
    let mut key = path.to_string();
    for (name, value) in query {
        key.push_str(&format!("&{name}={value}"));
    }
    key
}
