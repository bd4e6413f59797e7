//! Pure catalog filtering: no state, no side effects.
//!
//! Every function here is a plain transformation over a product slice.
//! Filter dimensions are independent narrowing predicates combined with
//! logical AND, so the order of application never changes the result.

use serde::{Deserialize, Serialize};
use timepiece_core::{Category, Price, ProductId};

use super::Product;

/// Inclusive price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

/// The set of active narrowing criteria applied to a product list.
///
/// An empty set or absent field means "no constraint on that dimension";
/// the default specification matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub categories: Vec<Category>,
    pub brands: Vec<String>,
    pub price_range: Option<PriceRange>,
    pub search: Option<String>,
}

impl FilterSpec {
    /// Whether a single product passes every active dimension.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.iter().any(|b| b == &product.brand) {
            return false;
        }
        if let Some(range) = self.price_range {
            if product.price < range.min || product.price > range.max {
                return false;
            }
        }
        if let Some(term) = self.search.as_deref() {
            let term = term.trim().to_lowercase();
            if !term.is_empty() && !matches_search(product, &term, false) {
                return false;
            }
        }
        true
    }
}

fn matches_search(product: &Product, term: &str, include_description: bool) -> bool {
    product.brand.to_lowercase().contains(term)
        || product.model.to_lowercase().contains(term)
        || product.category.as_str().contains(term)
        || (include_description && product.description.to_lowercase().contains(term))
}

/// Apply a filter specification, preserving catalog order.
#[must_use]
pub fn apply(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    products.iter().filter(|p| spec.matches(p)).cloned().collect()
}

/// Extended free-text search: also matches descriptions.
///
/// An empty or whitespace-only query yields no results.
#[must_use]
pub fn search(products: &[Product], query: &str) -> Vec<Product> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| matches_search(p, &term, true))
        .cloned()
        .collect()
}

/// The `limit` highest-priced products.
///
/// The sort is stable: products with equal prices keep their original
/// relative order.
#[must_use]
pub fn featured(products: &[Product], limit: usize) -> Vec<Product> {
    let mut sorted: Vec<Product> = products.to_vec();
    sorted.sort_by(|a, b| b.price.cmp(&a.price));
    sorted.truncate(limit);
    sorted
}

/// Up to `limit` products sharing `id`'s category but a different brand,
/// excluding the product itself, in catalog order.
///
/// Returns `None` when `id` is not in the list.
#[must_use]
pub fn related(products: &[Product], id: ProductId, limit: usize) -> Option<Vec<Product>> {
    let current = products.iter().find(|p| p.id == id)?;
    Some(
        products
            .iter()
            .filter(|p| p.id != id && p.category == current.category && p.brand != current.brand)
            .take(limit)
            .cloned()
            .collect(),
    )
}

/// Products currently in stock, in catalog order.
#[must_use]
pub fn in_stock(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.in_stock).cloned().collect()
}

/// Sorted distinct categories present in the list.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<Category> {
    let mut out: Vec<Category> = products.iter().map(|p| p.category).collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Sorted distinct brands present in the list.
#[must_use]
pub fn brands(products: &[Product]) -> Vec<String> {
    let mut out: Vec<String> = products.iter().map(|p| p.brand.clone()).collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Overall price bounds of the list, or `None` when it is empty.
#[must_use]
pub fn price_bounds(products: &[Product]) -> Option<PriceRange> {
    let min = products.iter().map(|p| p.price).min()?;
    let max = products.iter().map(|p| p.price).max()?;
    Some(PriceRange { min, max })
}
