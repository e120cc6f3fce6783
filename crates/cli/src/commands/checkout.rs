//! Cart file checkout.
//!
//! A cart file is a JSON array of entries:
//!
//! ```json
//! [
//!   { "product_id": 1, "size": "M", "quantity": 2 },
//!   { "product_id": 1, "size": "M", "customization": { "text": "ANA", "customizationCost": 15 } }
//! ]
//! ```
//!
//! Entries go through the cart store in order, so repeated keys merge the
//! same way they do in the storefront.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use uniformes_core::{ClientId, ProductId};
use uniformes_storefront::state::AppState;
use uniformes_storefront::stores::Customization;

use super::{CommandError, resolve_client};

/// One entry of a cart file.
#[derive(Debug, Clone, Deserialize)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub size: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub customization: Option<Customization>,
}

const fn default_quantity() -> u32 {
    1
}

/// Parse a cart file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON entry list.
pub fn read_cart_file(path: &Path) -> Result<Vec<CartEntry>, CommandError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the client's catalog, fill the cart from `file` and check out.
///
/// # Errors
///
/// Returns an error if the catalog can't be loaded, an entry names an
/// unknown product or size, or the checkout request fails.
pub async fn run(
    state: &AppState,
    file: &str,
    client: Option<ClientId>,
    dry_run: bool,
) -> Result<(), CommandError> {
    let entries = read_cart_file(Path::new(file))?;
    let client_id = resolve_client(state, client)?;

    // Sample data is fine for browsing but never for a real order
    if !state.catalog().set_selected_client(client_id).await.is_loaded() {
        return Err(CommandError::CatalogUnavailable(client_id));
    }

    fill_cart(state, &entries)?;

    let cart = state.cart();

    #[allow(clippy::print_stdout)]
    {
        for item in cart.items() {
            let line_total = item
                .line_total()
                .map_or_else(|| "-".to_string(), |total| total.to_string());
            let customization = item
                .customization
                .as_ref()
                .map(|c| format!(" [{}]", c.text))
                .unwrap_or_default();
            println!(
                "{:>3} x {:<32} {:<5} {:>12}{customization}",
                item.quantity,
                item.name,
                item.size,
                line_total,
            );
        }
        println!("{} items, total {}", cart.item_count(), cart.total());
    }

    if dry_run {
        return Ok(());
    }

    let receipt = cart.checkout().await?;
    info!("Checkout accepted");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    }
    Ok(())
}

/// Add every entry to the cart, validating products and sizes against the
/// loaded catalog.
///
/// # Errors
///
/// Returns an error for unknown products or sizes and invalid quantities.
pub fn fill_cart(state: &AppState, entries: &[CartEntry]) -> Result<(), CommandError> {
    for entry in entries {
        let product = state
            .catalog()
            .product(entry.product_id)
            .ok_or(CommandError::UnknownProduct(entry.product_id))?;

        if !product.sizes.is_empty() && product.size_entry(&entry.size).is_none() {
            return Err(CommandError::UnknownSize {
                product: entry.product_id,
                size: entry.size.clone(),
            });
        }

        state
            .cart()
            .add_item(&product, &entry.size, entry.quantity, entry.customization.clone())?;
    }
    Ok(())
}
