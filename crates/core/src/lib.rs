//! Timepiece Gallery Core - Shared types library.
//!
//! This crate provides common types used across all Timepiece Gallery
//! components:
//! - `storefront` - Public-facing e-commerce API
//! - `cli` - Command-line tools for catalog inspection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, categories, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
