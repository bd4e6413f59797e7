//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use timepiece_core::{Category, Price, ProductId};
use tracing::instrument;

use crate::catalog::{CatalogFacets, FilterSpec, PriceRange, Product};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Default size of featured and related product lists.
const DEFAULT_LIMIT: usize = 4;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Comma-separated category names.
    pub categories: Option<String>,
    /// Comma-separated brand names.
    pub brands: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
}

impl ProductListQuery {
    /// Translate query parameters into a filter specification.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for unknown categories or a half-open price
    /// range.
    pub fn into_spec(self) -> Result<FilterSpec> {
        let categories = self
            .categories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<Category>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let brands = self
            .brands
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let price_range = match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => Some(PriceRange {
                min: Price::new(min),
                max: Price::new(max),
            }),
            (None, None) => None,
            _ => {
                return Err(AppError::BadRequest(
                    "min_price and max_price must be provided together".to_string(),
                ));
            }
        };

        Ok(FilterSpec {
            categories,
            brands,
            price_range,
            search: self.search,
        })
    }
}

/// Limit query parameter for featured/related lists.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Search query parameter.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// List products matching the active filters.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>> {
    let spec = query.into_spec()?;
    Ok(Json(state.catalog().list(&spec).await?))
}

/// The highest-priced products.
#[instrument(skip(state))]
pub async fn featured(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Product>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(Json(state.catalog().featured(limit).await?))
}

/// A single product by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog().get(ProductId::new(id)).await?))
}

/// Products related to the given one.
#[instrument(skip(state))]
pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Product>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(Json(
        state.catalog().related(ProductId::new(id), limit).await?,
    ))
}

/// Free-text search including descriptions.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog().search(&query.q).await?))
}

/// Facet data for filter sidebars.
#[instrument(skip(state))]
pub async fn facets(State(state): State<AppState>) -> Result<Json<CatalogFacets>> {
    Ok(Json(state.catalog().facets().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_spec_empty_query() {
        let spec = ProductListQuery::default().into_spec().expect("valid");
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn test_into_spec_parses_csv_dimensions() {
        let query = ProductListQuery {
            categories: Some("luxury, sport".to_string()),
            brands: Some("Rolex,Casio".to_string()),
            min_price: Some(Decimal::from(100)),
            max_price: Some(Decimal::from(5000)),
            search: Some("diver".to_string()),
        };
        let spec = query.into_spec().expect("valid");
        assert_eq!(spec.categories, vec![Category::Luxury, Category::Sport]);
        assert_eq!(spec.brands, vec!["Rolex".to_string(), "Casio".to_string()]);
        assert_eq!(
            spec.price_range,
            Some(PriceRange {
                min: Price::new(Decimal::from(100)),
                max: Price::new(Decimal::from(5000)),
            })
        );
        assert_eq!(spec.search.as_deref(), Some("diver"));
    }

    #[test]
    fn test_into_spec_rejects_unknown_category() {
        let query = ProductListQuery {
            categories: Some("luxury,nautical".to_string()),
            ..ProductListQuery::default()
        };
        let err = query.into_spec().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("nautical")));
    }

    #[test]
    fn test_into_spec_rejects_half_open_price_range() {
        let query = ProductListQuery {
            min_price: Some(Decimal::from(100)),
            ..ProductListQuery::default()
        };
        assert!(matches!(
            query.into_spec(),
            Err(AppError::BadRequest(_))
        ));
    }
}
