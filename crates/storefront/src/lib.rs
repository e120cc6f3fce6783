//! Uniformes Storefront library.
//!
//! Client-side state and navigation for the uniforms shop: a REST client
//! for the shop backend, the cart, catalog and client stores, durable
//! selection storage and the navigation table.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use uniformes_core::ClientId;
//! use uniformes_storefront::{config::StorefrontConfig, state::AppState};
//!
//! let state = AppState::new(StorefrontConfig::from_env()?)?;
//! state.clients().fetch_clients().await;
//! state.clients().set_selected_client(ClientId::new(1))?;
//! state.catalog().set_selected_client(ClientId::new(1)).await;
//!
//! if let Some(product) = state.catalog().filtered_products().first() {
//!     state.cart().add_item(product, "M", 2, None)?;
//! }
//! let receipt = state.cart().checkout().await?;
//! # let _ = receipt;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod routes;
pub mod state;
pub mod storage;
pub mod stores;
