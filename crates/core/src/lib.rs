//! Uniformes Core - Shared types library.
//!
//! This crate provides common types used across all Uniformes components:
//! - `storefront` - Client-side state stores and navigation table
//! - `cli` - Command-line driver for the stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. Records mirror the backend's JSON shapes so they can be
//! deserialized straight from REST responses.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, prices, client and product records, the API envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
