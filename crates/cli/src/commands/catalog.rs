//! Client and product listing commands.

use uniformes_core::ClientId;
use uniformes_storefront::state::AppState;
use uniformes_storefront::stores::FetchOutcome;

use super::{CommandError, resolve_client};

/// Fetch and print the client list, marking the persisted selection.
///
/// # Errors
///
/// Returns an error if the persisted selection cannot be read.
pub async fn list_clients(state: &AppState) -> Result<(), CommandError> {
    let store = state.clients();
    store.load_selected_client()?;
    let outcome = store.fetch_clients().await;
    warn_if_degraded(outcome, store.error().as_deref());

    let selected = store.selected_client();

    #[allow(clippy::print_stdout)]
    for client in store.clients() {
        let marker = if Some(client.id) == selected { "*" } else { " " };
        let city = client.city.as_deref().unwrap_or("-");
        println!("{marker} {:>4}  {:<32} {city}", client.id, client.name);
    }
    Ok(())
}

/// Persist a client selection.
///
/// # Errors
///
/// Returns an error if the selection cannot be written.
pub fn select_client(state: &AppState, client_id: ClientId) -> Result<(), CommandError> {
    state.clients().set_selected_client(client_id)?;
    tracing::info!(%client_id, "Client selected");
    Ok(())
}

/// Fetch and print a client's products in one category.
///
/// # Errors
///
/// Returns an error if no client is given or persisted.
pub async fn list_products(
    state: &AppState,
    client: Option<ClientId>,
    category: &str,
) -> Result<(), CommandError> {
    let client_id = resolve_client(state, client)?;
    let catalog = state.catalog();
    catalog.set_category(category);

    let outcome = catalog.set_selected_client(client_id).await;
    warn_if_degraded(outcome, catalog.error().as_deref());

    #[allow(clippy::print_stdout)]
    for product in catalog.filtered_products() {
        let sizes = product.size_labels().collect::<Vec<_>>().join(",");
        println!(
            "{:>4}  {:<32} {:>12}  {:<14} {sizes}",
            product.id,
            product.name,
            product.price.to_string(),
            product.category_name().unwrap_or("-"),
        );
    }
    Ok(())
}

fn warn_if_degraded(outcome: FetchOutcome, error: Option<&str>) {
    match outcome {
        FetchOutcome::Degraded => {
            tracing::warn!(error = error.unwrap_or_default(), "Backend unavailable, showing sample data");
        }
        FetchOutcome::Rejected | FetchOutcome::Failed => {
            tracing::warn!(error = error.unwrap_or_default(), "Fetch failed");
        }
        FetchOutcome::Loaded { .. } | FetchOutcome::Skipped | FetchOutcome::Superseded => {}
    }
}
