//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CART_SLOT_PATH` - Path of the cart persistence slot
//!   (default: data/timepiece_gallery_cart.json)
//! - `CATALOG_BACKEND` - `local` (bundled dataset, default) or `remote`
//! - `BACKEND_BASE_URL` - Base URL of the remote backend
//!   (required when `CATALOG_BACKEND=remote`)
//! - `BACKEND_API_KEY` - API key for the remote backend

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path of the single file backing the cart persistence slot
    pub cart_slot_path: PathBuf,
    /// Which catalog/order backend is live
    pub backend: BackendMode,
}

/// Which provider implementations back the catalog and orders.
#[derive(Debug, Clone)]
pub enum BackendMode {
    /// Bundled dataset and in-memory order book.
    Local,
    /// Remote JSON backend.
    Remote(BackendConfig),
}

/// Remote backend connection settings.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g. <https://api.example.com/v1>)
    pub base_url: Url,
    /// API key sent as `X-Api-Key` (server-side only)
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, or if
    /// `CATALOG_BACKEND=remote` without a `BACKEND_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let cart_slot_path = PathBuf::from(get_env_or_default(
            "CART_SLOT_PATH",
            "data/timepiece_gallery_cart.json",
        ));
        let backend = backend_from_env()?;

        Ok(Self {
            host,
            port,
            cart_slot_path,
            backend,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn backend_from_env() -> Result<BackendMode, ConfigError> {
    match get_env_or_default("CATALOG_BACKEND", "local").as_str() {
        "local" => Ok(BackendMode::Local),
        "remote" => {
            let raw = get_required_env("BACKEND_BASE_URL")?;
            let base_url = Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("BACKEND_BASE_URL".to_string(), e.to_string())
            })?;
            let api_key = get_optional_env("BACKEND_API_KEY").map(SecretString::from);
            Ok(BackendMode::Remote(BackendConfig { base_url, api_key }))
        }
        other => Err(ConfigError::InvalidEnvVar(
            "CATALOG_BACKEND".to_string(),
            format!("expected 'local' or 'remote', got '{other}'"),
        )),
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            cart_slot_path: PathBuf::from("data/timepiece_gallery_cart.json"),
            backend: BackendMode::Local,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_backend_config_debug_redacts_api_key() {
        let config = BackendConfig {
            base_url: Url::parse("https://api.example.com/v1").unwrap(),
            api_key: Some(SecretString::from("super_secret_api_key")),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("https://api.example.com/v1"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key"));
    }
}
