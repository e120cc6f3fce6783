//! Session state shared by every view.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::StorefrontConfig;
use crate::storage::{FileStorage, ScalarStorage};
use crate::stores::{CartStore, CatalogStore, ClientStore, FetchOutcome};

/// The storefront session: configuration, backend client and the three
/// stores, constructed once and passed to whatever needs them.
///
/// This struct is cheaply cloneable; clones share the same stores.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: StorefrontConfig,
    api: ApiClient,
    cart: CartStore,
    catalog: CatalogStore,
    clients: ClientStore,
}

impl AppState {
    /// Create a session persisting its selection to `config.state_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let storage = Arc::new(FileStorage::new(config.state_path.clone()));
        Self::with_storage(config, storage)
    }

    /// Create a session with an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn ScalarStorage>,
    ) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config)?;
        let cart = CartStore::new(api.clone());
        let catalog = CatalogStore::new(api.clone(), config.fallback);
        let clients = ClientStore::new(api.clone(), storage, config.fallback);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                cart,
                catalog,
                clients,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    #[must_use]
    pub fn clients(&self) -> &ClientStore {
        &self.inner.clients
    }

    /// Restore the persisted client selection and load that client's products.
    ///
    /// Returns `None` when nothing was persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub async fn restore_session(&self) -> crate::error::Result<Option<FetchOutcome>> {
        let Some(client_id) = self.clients().load_selected_client()? else {
            return Ok(None);
        };
        Ok(Some(self.catalog().set_selected_client(client_id).await))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use uniformes_core::ClientId;

    fn offline_state() -> AppState {
        let config = StorefrontConfig::default()
            .with_api_url("http://127.0.0.1:9/api")
            .unwrap();
        AppState::with_storage(config, Arc::new(MemoryStorage::new())).unwrap()
    }

    #[tokio::test]
    async fn test_restore_without_selection() {
        let state = offline_state();
        assert_eq!(state.restore_session().await.unwrap(), None);
        assert!(state.catalog().products().is_empty());
    }

    #[tokio::test]
    async fn test_restore_selects_catalog_client() {
        let state = offline_state();
        state.clients().set_selected_client(ClientId::new(2)).unwrap();

        let outcome = state.restore_session().await.unwrap();
        assert_eq!(outcome, Some(FetchOutcome::Degraded));
        assert_eq!(state.catalog().selected_client(), Some(ClientId::new(2)));
    }

    #[test]
    fn test_clones_share_stores() {
        let state = offline_state();
        let clone = state.clone();
        clone.cart().clear_cart();
        assert!(state.cart().is_empty());
        assert_eq!(state.config().api_url.as_str(), "http://127.0.0.1:9/api");
    }
}
