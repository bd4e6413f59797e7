//! Unified error handling for route handlers.
//!
//! Provides a unified `AppError` type mapped to HTTP responses. All route
//! handlers return `Result<T, AppError>`. Internal detail is never exposed
//! to clients; server-side errors are logged before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::orders::OrderError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server-side failures with full detail
        if matches!(
            self,
            Self::Internal(_)
                | Self::Catalog(CatalogError::Http(_) | CatalogError::Backend(_) | CatalogError::Data(_))
                | Self::Order(OrderError::Http(_) | OrderError::Backend(_))
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Catalog(CatalogError::NotFound(_)) | Self::Order(OrderError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Catalog(CatalogError::Http(_) | CatalogError::Backend(_))
            | Self::Order(OrderError::Http(_) | OrderError::Backend(_)) => StatusCode::BAD_GATEWAY,
            Self::Catalog(CatalogError::Data(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Catalog(CatalogError::NotFound(_)) | Self::Order(OrderError::NotFound(_)) => {
                self.to_string()
            }
            Self::Catalog(_) | Self::Order(_) => "External service error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
