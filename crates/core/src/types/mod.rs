//! Core types for Timepiece Gallery.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod status;

pub use category::{Category, CategoryParseError};
pub use id::*;
pub use price::Price;
pub use status::OrderStatus;
