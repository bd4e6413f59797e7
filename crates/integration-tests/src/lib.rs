//! Integration tests for Timepiece Gallery.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process flow tests (no server required)
//! cargo test -p timepiece-integration-tests
//!
//! # End-to-end API tests (require a running storefront)
//! cargo run -p timepiece-storefront &
//! cargo test -p timepiece-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart ledger and order flow against in-process
//!   providers
//! - `storefront_api` - HTTP tests against a running storefront
