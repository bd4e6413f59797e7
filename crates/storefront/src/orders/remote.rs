//! Order provider backed by a remote JSON backend.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use timepiece_core::OrderId;
use tracing::instrument;

use super::{NewOrder, Order, OrderError};
use crate::config::BackendConfig;

/// Client for the remote order backend.
///
/// Order creation is a mutation, so nothing here is cached.
#[derive(Clone)]
pub struct RemoteOrders {
    inner: Arc<RemoteOrdersInner>,
}

struct RemoteOrdersInner {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl RemoteOrders {
    /// Create a new remote order client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(RemoteOrdersInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.inner.api_key {
            Some(key) => builder.header("X-Api-Key", key.expose_secret()),
            None => builder,
        }
    }

    /// Create an order on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or rejects the order.
    #[instrument(skip(self, new_order))]
    pub async fn create(&self, new_order: NewOrder) -> Result<Order, OrderError> {
        let builder = self
            .inner
            .client
            .post(format!("{}/orders", self.inner.base_url))
            .json(&new_order);
        let response = self.with_auth(builder).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrderError::Backend(status));
        }
        Ok(response.json().await?)
    }

    /// Fetch an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for unknown ids.
    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Order, OrderError> {
        let builder = self
            .inner
            .client
            .get(format!("{}/orders/{id}", self.inner.base_url));
        let response = self.with_auth(builder).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OrderError::NotFound(id));
        }
        if !status.is_success() {
            return Err(OrderError::Backend(status));
        }
        Ok(response.json().await?)
    }
}
