//! Catalog provider backed by the bundled dataset.

use std::sync::Arc;

use timepiece_core::ProductId;

use super::filter;
use super::{CatalogError, CatalogFacets, FilterSpec, Product};

/// The dataset shipped with the binary.
const BUNDLED_DATASET: &str = include_str!("../../data/watches.json");

/// In-process catalog provider.
///
/// The whole dataset is parsed and validated once at construction; every
/// query is a pure evaluation of the [`filter`] engine over it.
#[derive(Clone)]
pub struct LocalCatalog {
    watches: Arc<Vec<Product>>,
}

impl LocalCatalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub fn new(watches: Vec<Product>) -> Self {
        Self {
            watches: Arc::new(watches),
        }
    }

    /// Build the catalog from the bundled dataset.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Data`] if the bundled JSON is malformed.
    pub fn from_bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Build a catalog from raw JSON (an array of products).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Data`] on malformed JSON or products with
    /// missing required fields or unknown categories.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let watches: Vec<Product> = serde_json::from_str(raw)?;
        Ok(Self::new(watches))
    }

    /// All watches in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.watches
    }

    /// List watches matching a filter specification.
    #[must_use]
    pub fn list(&self, spec: &FilterSpec) -> Vec<Product> {
        filter::apply(&self.watches, spec)
    }

    /// Fetch a single watch by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids.
    pub fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.watches
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// The `limit` highest-priced watches.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<Product> {
        filter::featured(&self.watches, limit)
    }

    /// Up to `limit` watches related to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids.
    pub fn related(&self, id: ProductId, limit: usize) -> Result<Vec<Product>, CatalogError> {
        filter::related(&self.watches, id, limit).ok_or(CatalogError::NotFound(id))
    }

    /// Free-text search including descriptions.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Product> {
        filter::search(&self.watches, query)
    }

    /// Facet data for filter sidebars.
    #[must_use]
    pub fn facets(&self) -> CatalogFacets {
        CatalogFacets {
            categories: filter::categories(&self.watches),
            brands: filter::brands(&self.watches),
            price_bounds: filter::price_bounds(&self.watches),
        }
    }
}
