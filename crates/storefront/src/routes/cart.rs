//! Cart route handlers.
//!
//! Every mutation responds with the full cart view so clients can rerender
//! without a second round trip.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use timepiece_core::ProductId;
use tracing::instrument;

use crate::cart::{CartLine, CartSummary};
use crate::error::Result;
use crate::state::AppState;

/// Cart response body: the lines plus derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub summary: CartSummary,
}

impl CartView {
    fn current(state: &AppState) -> Self {
        Self {
            items: state.cart().lines(),
            summary: state.cart().summary(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: i64,
    pub quantity: Option<u32>,
}

/// Update cart line request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub quantity: u32,
}

/// Show the current cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::current(&state))
}

/// Add a watch to the cart.
///
/// The watch is fetched from the catalog so the cart line snapshots live
/// display data; unknown ids surface as 404.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartView>)> {
    let product = state
        .catalog()
        .get(ProductId::new(request.product_id))
        .await?;
    state.cart().add(&product, request.quantity.unwrap_or(1));
    Ok((StatusCode::CREATED, Json(CartView::current(&state))))
}

/// Set a cart line's quantity. A quantity of 0 removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateItemRequest>,
) -> Json<CartView> {
    state
        .cart()
        .update_quantity(ProductId::new(id), request.quantity);
    Json(CartView::current(&state))
}

/// Remove a cart line. Removing an absent line is a no-op.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Json<CartView> {
    state.cart().remove(ProductId::new(id));
    Json(CartView::current(&state))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    state.cart().clear();
    Json(CartView::current(&state))
}
