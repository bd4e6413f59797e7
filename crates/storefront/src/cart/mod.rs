//! The cart ledger: in-session cart state with best-effort persistence.
//!
//! The ledger owns the authoritative line list for the session. Every
//! mutation runs read-modify-write under one lock and then persists the
//! full state wholesale to its slot. Slot failures are logged and
//! swallowed: in-memory state stays correct for the current session even
//! when durability is lost.

mod slot;

pub use slot::{CartSlot, FileSlot, MemorySlot, SlotError};

use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timepiece_core::{Price, ProductId};
use tracing::{error, warn};

use crate::catalog::Product;

/// Sales tax rate applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotals strictly above this amount ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::new(Decimal::from_parts(1000, 0, 0, false, 0));

/// Flat shipping fee charged below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Price = Price::new(Decimal::from_parts(50, 0, 0, false, 0));

/// One cart entry: a product snapshot plus quantity.
///
/// Display fields are denormalized at add time so the cart renders even if
/// the catalog changes afterwards. Quantity is always at least 1; a line
/// that would reach zero is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub brand: String,
    pub model: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// The line total (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Derived cart totals. Never mutates state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: u32,
    pub subtotal: Price,
    pub tax: Price,
    pub shipping: Price,
    pub total: Price,
}

/// The in-session shopping cart, persisted to a single slot.
///
/// Constructed once at startup and owned by the application state; tests
/// construct fresh instances with a [`MemorySlot`].
pub struct CartLedger {
    slot: Box<dyn CartSlot>,
    lines: Mutex<Vec<CartLine>>,
}

impl CartLedger {
    /// Create a ledger over a persistence slot, loading any stored state.
    ///
    /// Absent or corrupt stored data yields an empty cart; corruption is
    /// logged but is not an error.
    #[must_use]
    pub fn new(slot: Box<dyn CartSlot>) -> Self {
        let lines = match slot.read() {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(lines) => lines,
                Err(e) => {
                    warn!("Discarding corrupt cart data: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load cart data, starting empty: {e}");
                Vec::new()
            }
        };

        Self {
            slot,
            lines: Mutex::new(lines),
        }
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().clone()
    }

    /// Add a watch to the cart.
    ///
    /// Increments the quantity of an existing line for the same watch, or
    /// appends a new snapshot line. Quantities below 1 are treated as 1.
    /// Returns the updated lines.
    pub fn add(&self, product: &Product, quantity: u32) -> Vec<CartLine> {
        let quantity = quantity.max(1);
        let mut lines = self.lock();

        if let Some(line) = lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            lines.push(CartLine {
                product_id: product.id,
                brand: product.brand.clone(),
                model: product.model.clone(),
                price: product.price,
                image: product.display_image().to_string(),
                quantity,
            });
        }

        self.persist(&lines);
        lines.clone()
    }

    /// Remove the line for a watch. No-op if absent. Returns updated lines.
    pub fn remove(&self, product_id: ProductId) -> Vec<CartLine> {
        let mut lines = self.lock();
        lines.retain(|l| l.product_id != product_id);
        self.persist(&lines);
        lines.clone()
    }

    /// Set a line's quantity exactly (not additive).
    ///
    /// A quantity of 0 behaves exactly like [`CartLedger::remove`]. No-op
    /// for unknown ids. Returns the updated lines.
    pub fn update_quantity(&self, product_id: ProductId, quantity: u32) -> Vec<CartLine> {
        if quantity == 0 {
            return self.remove(product_id);
        }

        let mut lines = self.lock();
        if let Some(line) = lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
            self.persist(&lines);
        }
        lines.clone()
    }

    /// Empty the cart and clear the persistence slot.
    pub fn clear(&self) -> Vec<CartLine> {
        let mut lines = self.lock();
        lines.clear();
        if let Err(e) = self.slot.delete() {
            error!("Failed to clear cart slot: {e}");
        }
        lines.clone()
    }

    /// Compute derived totals from the current lines.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        summarize(&self.lock())
    }

    /// Lines and summary captured under one lock, so they always agree
    /// even with concurrent mutations.
    #[must_use]
    pub fn snapshot(&self) -> (Vec<CartLine>, CartSummary) {
        let lines = self.lock();
        (lines.clone(), summarize(&lines))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CartLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the full state wholesale. Failures are logged, not raised.
    fn persist(&self, lines: &[CartLine]) {
        let blob = match serde_json::to_string(lines) {
            Ok(blob) => blob,
            Err(e) => {
                error!("Failed to serialize cart state: {e}");
                return;
            }
        };
        if let Err(e) = self.slot.write(&blob) {
            error!("Failed to persist cart state: {e}");
        }
    }
}

/// Derive totals from a line list. Quantities saturate rather than wrap,
/// matching the add path.
fn summarize(lines: &[CartLine]) -> CartSummary {
    let item_count = lines
        .iter()
        .map(|l| l.quantity)
        .fold(0u32, u32::saturating_add);
    let subtotal: Price = lines.iter().map(CartLine::line_total).sum();
    let tax = subtotal.scale_by(TAX_RATE);
    let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
        Price::ZERO
    } else {
        FLAT_SHIPPING_FEE
    };

    CartSummary {
        item_count,
        subtotal,
        tax,
        shipping,
        total: subtotal + tax + shipping,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use timepiece_core::Category;

    use super::*;

    fn price(amount: &str) -> Price {
        Price::new(amount.parse().expect("valid decimal"))
    }

    fn watch(id: i64, brand: &str, amount: &str) -> Product {
        Product {
            id: ProductId::new(id),
            brand: brand.to_string(),
            model: format!("Model {id}"),
            category: Category::Luxury,
            price: price(amount),
            description: String::new(),
            images: vec![format!("https://cdn.example.com/{id}.jpg")],
            in_stock: true,
            specifications: BTreeMap::new(),
        }
    }

    fn ledger() -> CartLedger {
        CartLedger::new(Box::new(MemorySlot::new()))
    }

    #[test]
    fn test_add_new_line_snapshots_product() {
        let ledger = ledger();
        let lines = ledger.add(&watch(1, "Rolex", "500"), 2);
        assert_eq!(lines.len(), 1);
        let line = lines.first().expect("one line");
        assert_eq!(line.product_id, ProductId::new(1));
        assert_eq!(line.brand, "Rolex");
        assert_eq!(line.price, price("500"));
        assert_eq!(line.image, "https://cdn.example.com/1.jpg");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_repeated_adds_accumulate_quantity() {
        let ledger = ledger();
        let product = watch(1, "Rolex", "500");
        ledger.add(&product, 1);
        ledger.add(&product, 2);
        let lines = ledger.add(&product, 3);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| l.quantity), Some(6));
    }

    #[test]
    fn test_add_clamps_zero_quantity_to_one() {
        let ledger = ledger();
        let lines = ledger.add(&watch(1, "Rolex", "500"), 0);
        assert_eq!(lines.first().map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_add_saturates_at_max_quantity() {
        let ledger = ledger();
        let product = watch(1, "Rolex", "500");
        ledger.add(&product, u32::MAX);
        // A further add must not wrap the line back toward zero.
        let lines = ledger.add(&product, 1);
        assert_eq!(lines.first().map(|l| l.quantity), Some(u32::MAX));

        // The item count saturates too instead of wrapping.
        ledger.add(&watch(2, "Omega", "300"), 2);
        assert_eq!(ledger.summary().item_count, u32::MAX);
    }

    #[test]
    fn test_snapshot_lines_and_summary_agree() {
        let ledger = ledger();
        ledger.add(&watch(1, "Rolex", "500"), 2);
        ledger.add(&watch(2, "Omega", "300"), 1);

        let (lines, summary) = ledger.snapshot();
        assert_eq!(lines, ledger.lines());
        assert_eq!(summary, ledger.summary());
        assert_eq!(summary.subtotal, price("1300"));
    }

    #[test]
    fn test_lines_preserve_insertion_order() {
        let ledger = ledger();
        ledger.add(&watch(2, "Omega", "300"), 1);
        ledger.add(&watch(1, "Rolex", "500"), 1);
        ledger.add(&watch(2, "Omega", "300"), 1);
        let ids: Vec<i64> = ledger.lines().iter().map(|l| l.product_id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let ledger = ledger();
        ledger.add(&watch(1, "Rolex", "500"), 3);
        let lines = ledger.update_quantity(ProductId::new(1), 7);
        assert_eq!(lines.first().map(|l| l.quantity), Some(7));
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let make_cart = || {
            let ledger = ledger();
            ledger.add(&watch(1, "Rolex", "500"), 2);
            ledger.add(&watch(2, "Omega", "300"), 1);
            ledger
        };

        let via_update = make_cart();
        via_update.update_quantity(ProductId::new(1), 0);

        let via_remove = make_cart();
        via_remove.remove(ProductId::new(1));

        assert_eq!(via_update.lines(), via_remove.lines());
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let ledger = ledger();
        ledger.add(&watch(1, "Rolex", "500"), 2);
        let before = ledger.lines();
        assert_eq!(ledger.update_quantity(ProductId::new(99), 5), before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let ledger = ledger();
        ledger.add(&watch(1, "Rolex", "500"), 1);
        let once = ledger.remove(ProductId::new(1));
        let twice = ledger.remove(ProductId::new(1));
        assert_eq!(once, twice);
        assert!(twice.is_empty());
    }

    #[test]
    fn test_summary_above_free_shipping_threshold() {
        let ledger = ledger();
        ledger.add(&watch(1, "Rolex", "500"), 2);
        ledger.add(&watch(2, "Omega", "300"), 1);

        let summary = ledger.summary();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, price("1300"));
        assert_eq!(summary.tax, price("104.00"));
        assert_eq!(summary.shipping, Price::ZERO);
        assert_eq!(summary.total, price("1404.00"));
    }

    #[test]
    fn test_summary_at_exact_threshold_charges_shipping() {
        let ledger = ledger();
        ledger.add(&watch(1, "Rolex", "1000"), 1);

        // The threshold is strict: exactly 1000 still pays flat shipping.
        let summary = ledger.summary();
        assert_eq!(summary.subtotal, price("1000"));
        assert_eq!(summary.shipping, price("50"));
        assert_eq!(summary.total, price("1130.00"));
    }

    #[test]
    fn test_summary_empty_cart() {
        let summary = ledger().summary();
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.subtotal, Price::ZERO);
        assert_eq!(summary.tax, Price::ZERO);
        // The flat fee applies below the threshold, even at zero; the
        // presentation layer never shows it because checkout requires a
        // non-empty cart.
        assert_eq!(summary.shipping, FLAT_SHIPPING_FEE);
    }

    #[test]
    fn test_persistence_roundtrip() {
        let slot = MemorySlot::new();
        let ledger = CartLedger::new(Box::new(slot.clone()));
        ledger.add(&watch(1, "Rolex", "500"), 2);
        ledger.add(&watch(2, "Omega", "300"), 1);
        ledger.update_quantity(ProductId::new(2), 4);
        let expected = ledger.lines();

        let reloaded = CartLedger::new(Box::new(slot));
        assert_eq!(reloaded.lines(), expected);
    }

    #[test]
    fn test_load_after_clear_is_empty() {
        let slot = MemorySlot::new();
        let ledger = CartLedger::new(Box::new(slot.clone()));
        ledger.add(&watch(1, "Rolex", "500"), 1);
        ledger.clear();

        let reloaded = CartLedger::new(Box::new(slot.clone()));
        assert!(reloaded.lines().is_empty());
        assert!(slot.read().expect("read").is_none());
    }

    #[test]
    fn test_corrupt_blob_loads_as_empty() {
        let slot = MemorySlot::with_value("definitely not json");
        let ledger = CartLedger::new(Box::new(slot));
        assert!(ledger.lines().is_empty());
    }

    /// Slot that fails every operation, for the failure-path tests.
    struct FailingSlot {
        writes: AtomicUsize,
    }

    impl FailingSlot {
        fn new() -> Self {
            Self {
                writes: AtomicUsize::new(0),
            }
        }
    }

    impl CartSlot for FailingSlot {
        fn read(&self) -> Result<Option<String>, SlotError> {
            Err(std::io::Error::other("read failed").into())
        }

        fn write(&self, _payload: &str) -> Result<(), SlotError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Err(std::io::Error::other("write failed").into())
        }

        fn delete(&self) -> Result<(), SlotError> {
            Err(std::io::Error::other("delete failed").into())
        }
    }

    #[test]
    fn test_slot_failures_never_escape_the_ledger() {
        let ledger = CartLedger::new(Box::new(FailingSlot::new()));
        assert!(ledger.lines().is_empty());

        let lines = ledger.add(&watch(1, "Rolex", "500"), 2);
        assert_eq!(lines.first().map(|l| l.quantity), Some(2));

        // In-memory state stays correct even though every write fails.
        ledger.update_quantity(ProductId::new(1), 5);
        assert_eq!(ledger.summary().item_count, 5);
        assert!(ledger.clear().is_empty());
    }
}
