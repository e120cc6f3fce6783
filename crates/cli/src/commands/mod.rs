//! CLI command implementations.

pub mod catalog;
pub mod checkout;
pub mod navigation;

use thiserror::Error;

use uniformes_core::{ClientId, ProductId};
use uniformes_storefront::error::StoreError;
use uniformes_storefront::routes::NavigationError;
use uniformes_storefront::state::AppState;
use uniformes_storefront::stores::CartError;

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No client selected; pass --client or run `uf-cli select <id>`")]
    NoClientSelected,

    #[error("Product {0} is not offered to this client")]
    UnknownProduct(ProductId),

    #[error("Product {product} has no size {size}")]
    UnknownSize { product: ProductId, size: String },

    #[error("Could not load products for client {0}")]
    CatalogUnavailable(ClientId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("Cannot read cart file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid cart file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The explicit client, else the persisted selection.
///
/// # Errors
///
/// Returns `CommandError::NoClientSelected` when neither is available.
pub fn resolve_client(state: &AppState, explicit: Option<ClientId>) -> Result<ClientId, CommandError> {
    if let Some(client_id) = explicit {
        return Ok(client_id);
    }
    state
        .clients()
        .load_selected_client()?
        .ok_or(CommandError::NoClientSelected)
}
