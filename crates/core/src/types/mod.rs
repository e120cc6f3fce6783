//! Core types for the Uniformes storefront.
//!
//! This module provides type-safe wrappers for common domain concepts and
//! the read-only records served by the shop backend.

pub mod client;
pub mod envelope;
pub mod id;
pub mod price;
pub mod product;

pub use client::Client;
pub use envelope::ApiEnvelope;
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{Product, ProductCategory, ProductMedia, ProductSize};
