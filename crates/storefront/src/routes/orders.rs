//! Checkout and order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use timepiece_core::OrderId;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::orders::{NewOrder, Order, PaymentMethod, ShippingAddress};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

/// Create an order from the current cart and clear it on success.
///
/// Rejects an empty cart and blank required address fields with 400.
#[instrument(skip(state, request))]
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    // One snapshot, so the order's items and total always agree.
    let (items, summary) = state.cart().snapshot();
    if items.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let missing = request.shipping_address.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let order = state
        .orders()
        .create(NewOrder {
            items,
            total_amount: summary.total,
            shipping_address: request.shipping_address,
            payment_method: request.payment_method,
        })
        .await?;

    // The cart's only interaction with orders: clear after a successful
    // creation.
    state.cart().clear();
    tracing::info!(order_number = %order.order_number, "Order placed");

    Ok((StatusCode::CREATED, Json(order)))
}

/// Fetch an order by id.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Order>> {
    Ok(Json(state.orders().get(OrderId::new(id)).await?))
}
