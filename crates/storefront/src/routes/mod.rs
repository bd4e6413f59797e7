//! HTTP route handlers.
//!
//! Handlers are thin: they translate requests into provider/ledger calls
//! and domain values into JSON. No business logic lives here.

pub mod cart;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::list))
        .route("/api/products/featured", get(products::featured))
        .route("/api/products/{id}", get(products::show))
        .route("/api/products/{id}/related", get(products::related))
        .route("/api/search", get(products::search))
        .route("/api/catalog/facets", get(products::facets))
        .route("/api/cart", get(cart::show).delete(cart::clear))
        .route("/api/cart/items", post(cart::add))
        .route(
            "/api/cart/items/{id}",
            axum::routing::patch(cart::update).delete(cart::remove),
        )
        .route("/api/checkout", post(orders::checkout))
        .route("/api/orders/{id}", get(orders::show))
}
