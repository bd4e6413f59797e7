//! In-memory order book.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use rand::Rng;
use timepiece_core::{OrderId, OrderStatus};

use super::{NewOrder, Order, OrderError};

/// Order number prefix for Timepiece Gallery.
const ORDER_NUMBER_PREFIX: &str = "TG";

/// In-process order provider.
///
/// Orders live for the lifetime of the process; ids are allocated as
/// max-plus-one so they stay stable within a session.
#[derive(Clone, Default)]
pub struct LocalOrders {
    orders: Arc<Mutex<Vec<Order>>>,
}

impl LocalOrders {
    /// Create an empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an order with status `confirmed` and a fresh order number.
    pub fn create(&self, new_order: NewOrder) -> Order {
        let mut orders = self.lock();
        let id = orders
            .iter()
            .map(|o| o.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;

        let order = Order {
            id: OrderId::new(id),
            order_number: generate_order_number(),
            items: new_order.items,
            total_amount: new_order.total_amount,
            shipping_address: new_order.shipping_address,
            payment_method: new_order.payment_method,
            placed_at: Utc::now(),
            status: OrderStatus::Confirmed,
        };
        orders.push(order.clone());
        order
    }

    /// Fetch an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for unknown ids.
    pub fn get(&self, id: OrderId) -> Result<Order, OrderError> {
        self.lock()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(OrderError::NotFound(id))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Order>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Generate a human-readable order number: the `TG` prefix, the trailing
/// six digits of the epoch-millis timestamp, and three random digits.
fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let tail: String = millis
        .chars()
        .skip(millis.len().saturating_sub(6))
        .collect();
    let suffix: u32 = rand::rng().random_range(0..1000);
    format!("{ORDER_NUMBER_PREFIX}{tail}{suffix:03}")
}

#[cfg(test)]
mod tests {
    use timepiece_core::Price;

    use super::super::{PaymentMethod, ShippingAddress};
    use super::*;

    fn new_order() -> NewOrder {
        NewOrder {
            items: Vec::new(),
            total_amount: Price::new("1404".parse().expect("valid decimal")),
            shipping_address: ShippingAddress {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                address: "1 Analytical Way".to_string(),
                city: "London".to_string(),
                state: "LDN".to_string(),
                zip_code: "E1 6AN".to_string(),
            },
            payment_method: PaymentMethod::CreditCard,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let orders = LocalOrders::new();
        let first = orders.create(new_order());
        let second = orders.create(new_order());
        assert_eq!(first.id, OrderId::new(1));
        assert_eq!(second.id, OrderId::new(2));
    }

    #[test]
    fn test_create_sets_confirmed_status() {
        let orders = LocalOrders::new();
        assert_eq!(orders.create(new_order()).status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_get_roundtrip() {
        let orders = LocalOrders::new();
        let created = orders.create(new_order());
        let fetched = orders.get(created.id).expect("order exists");
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_get_unknown_id() {
        let orders = LocalOrders::new();
        let err = orders.get(OrderId::new(42)).unwrap_err();
        assert_eq!(err.to_string(), "order 42 not found");
    }

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        assert!(number.starts_with("TG"));
        assert_eq!(number.len(), 11);
        assert!(number.chars().skip(2).all(|c| c.is_ascii_digit()));
    }
}
