//! Catalog providers and the filtering engine.
//!
//! # Architecture
//!
//! The pure filtering logic lives in [`filter`] and operates on plain
//! product slices. Two interchangeable providers expose it:
//!
//! - [`LocalCatalog`] - bundled JSON dataset evaluated in-process
//! - [`RemoteCatalog`] - JSON backend reached over HTTP, with the filter
//!   specification translated to query parameters
//!
//! Callers go through the [`Catalog`] dispatch enum so ledger and route
//! code never depends on a concrete provider.

pub mod filter;
mod local;
mod remote;

pub use filter::{FilterSpec, PriceRange};
pub use local::LocalCatalog;
pub use remote::RemoteCatalog;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use timepiece_core::{Category, Price, ProductId};

/// A watch as supplied by a catalog provider.
///
/// Required fields are enforced at deserialization time; a provider
/// response missing any of them is rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub brand: String,
    pub model: String,
    pub category: Category,
    pub price: Price,
    pub description: String,
    /// Ordered image URIs; the first one is the display image.
    #[serde(default)]
    pub images: Vec<String>,
    pub in_stock: bool,
    /// Free-form specification mapping (e.g. "Movement" -> "Automatic").
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

impl Product {
    /// The display image for cart snapshots (first image, or empty).
    #[must_use]
    pub fn display_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }
}

/// Facet data for filter sidebars: the distinct categories and brands in
/// the catalog plus its overall price bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFacets {
    pub categories: Vec<Category>,
    pub brands: Vec<String>,
    pub price_bounds: Option<PriceRange>,
}

/// Errors that can occur when querying a catalog provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Requested watch does not exist.
    #[error("watch {0} not found")]
    NotFound(ProductId),

    /// HTTP request to the remote backend failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote backend returned a non-success status.
    #[error("backend error: status {0}")]
    Backend(reqwest::StatusCode),

    /// Catalog data failed to parse.
    #[error("invalid catalog data: {0}")]
    Data(#[from] serde_json::Error),
}

/// Catalog capability: either the bundled dataset or a remote backend.
///
/// Both variants implement the same contract; which one is live is decided
/// once at startup from configuration.
#[derive(Clone)]
pub enum Catalog {
    Local(LocalCatalog),
    Remote(RemoteCatalog),
}

impl Catalog {
    /// List watches matching a filter specification.
    ///
    /// An empty catalog or an all-excluding filter yields an empty vector,
    /// never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote backend is unreachable or returns
    /// invalid data.
    pub async fn list(&self, spec: &FilterSpec) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Local(catalog) => Ok(catalog.list(spec)),
            Self::Remote(catalog) => catalog.list(spec).await,
        }
    }

    /// Fetch a single watch by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids.
    pub async fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        match self {
            Self::Local(catalog) => catalog.get(id),
            Self::Remote(catalog) => catalog.get(id).await,
        }
    }

    /// The `limit` highest-priced watches, original order preserved on ties.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote backend is unreachable.
    pub async fn featured(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Local(catalog) => Ok(catalog.featured(limit)),
            Self::Remote(catalog) => catalog.featured(limit).await,
        }
    }

    /// Up to `limit` watches sharing `id`'s category but not its brand.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids.
    pub async fn related(&self, id: ProductId, limit: usize) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Local(catalog) => catalog.related(id, limit),
            Self::Remote(catalog) => catalog.related(id, limit).await,
        }
    }

    /// Free-text search over brand, model, category, and description.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote backend is unreachable.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Local(catalog) => Ok(catalog.search(query)),
            Self::Remote(catalog) => catalog.search(query).await,
        }
    }

    /// Facet data for filter sidebars.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote backend is unreachable.
    pub async fn facets(&self) -> Result<CatalogFacets, CatalogError> {
        match self {
            Self::Local(catalog) => Ok(catalog.facets()),
            Self::Remote(catalog) => catalog.facets().await,
        }
    }
}
