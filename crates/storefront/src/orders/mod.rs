//! Order providers.
//!
//! Orders are owned by an external collaborator; the storefront only
//! creates them from the cart's line items and looks them up by id. Like
//! the catalog, two interchangeable providers sit behind one dispatch
//! enum: an in-memory order book and a remote JSON backend.

mod local;
mod remote;

pub use local::LocalOrders;
pub use remote::RemoteOrders;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use timepiece_core::{OrderId, OrderStatus, Price};

use crate::cart::CartLine;

/// Errors that can occur when creating or fetching orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Requested order does not exist.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// HTTP request to the remote backend failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote backend returned a non-success status.
    #[error("backend error: status {0}")]
    Backend(reqwest::StatusCode),
}

/// Shipping destination collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingAddress {
    /// Names of required fields that are empty or whitespace-only.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Payment method selected at checkout. Collected and forwarded only;
/// no payment processing happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
}

/// A confirmed order as returned by an order provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Human-readable order number (e.g. "TG123456042").
    pub order_number: String,
    pub items: Vec<CartLine>,
    pub total_amount: Price,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Input to order creation: the cart's lines plus checkout form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<CartLine>,
    pub total_amount: Price,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

/// Order capability: in-memory book or remote backend.
#[derive(Clone)]
pub enum Orders {
    Local(LocalOrders),
    Remote(RemoteOrders),
}

impl Orders {
    /// Create an order. The caller clears the cart on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote backend is unreachable.
    pub async fn create(&self, new_order: NewOrder) -> Result<Order, OrderError> {
        match self {
            Self::Local(orders) => Ok(orders.create(new_order)),
            Self::Remote(orders) => orders.create(new_order).await,
        }
    }

    /// Fetch an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for unknown ids.
    pub async fn get(&self, id: OrderId) -> Result<Order, OrderError> {
        match self {
            Self::Local(orders) => orders.get(id),
            Self::Remote(orders) => orders.get(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "E1 6AN".to_string(),
        }
    }

    #[test]
    fn test_complete_address_has_no_missing_fields() {
        assert!(address().missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_reports_blank_and_whitespace() {
        let mut addr = address();
        addr.email = String::new();
        addr.zip_code = "   ".to_string();
        assert_eq!(addr.missing_fields(), vec!["email", "zipCode"]);
    }

    #[test]
    fn test_payment_method_serde() {
        let json = serde_json::to_string(&PaymentMethod::CreditCard).expect("serialize");
        assert_eq!(json, "\"credit_card\"");
    }
}
