//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::{CartLedger, FileSlot};
use crate::catalog::{Catalog, CatalogError, LocalCatalog, RemoteCatalog};
use crate::config::{BackendMode, StorefrontConfig};
use crate::orders::{LocalOrders, Orders, RemoteOrders};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the catalog and order providers and the cart ledger.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    orders: Orders,
    cart: CartLedger,
}

impl AppState {
    /// Create the application state from configuration.
    ///
    /// Picks the catalog/order providers from the configured backend mode
    /// and loads the cart ledger from its persistence slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog dataset fails validation.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let (catalog, orders) = match &config.backend {
            BackendMode::Local => (
                Catalog::Local(LocalCatalog::from_bundled()?),
                Orders::Local(LocalOrders::new()),
            ),
            BackendMode::Remote(backend) => (
                Catalog::Remote(RemoteCatalog::new(backend)),
                Orders::Remote(RemoteOrders::new(backend)),
            ),
        };
        let cart = CartLedger::new(Box::new(FileSlot::new(&config.cart_slot_path)));

        Ok(Self::with_parts(config, catalog, orders, cart))
    }

    /// Assemble state from explicit parts. Used by tests to inject
    /// in-memory providers and slots.
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: Catalog,
        orders: Orders,
        cart: CartLedger,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                orders,
                cart,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog provider.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the order provider.
    #[must_use]
    pub fn orders(&self) -> &Orders {
        &self.inner.orders
    }

    /// Get a reference to the cart ledger.
    #[must_use]
    pub fn cart(&self) -> &CartLedger {
        &self.inner.cart
    }
}
