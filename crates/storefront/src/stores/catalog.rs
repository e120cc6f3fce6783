//! Catalog store: products of the selected client.
//!
//! Fetches are keyed by a monotonically increasing request sequence. When a
//! response arrives, it is applied only if no newer fetch (or cancellation)
//! has started since, so selecting client A then client B quickly never
//! leaves A's products on screen.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use uniformes_core::{ClientId, Product, ProductId};

use super::FetchOutcome;
use crate::api::ApiClient;
use crate::error::{add_breadcrumb, report_error};
use crate::fallback::{FallbackPolicy, sample_products};

/// Sentinel category that disables filtering.
pub const ALL_CATEGORIES: &str = "Todos";

/// Categories offered by the filter, sentinel first.
pub const CATEGORIES: [&str; 3] = [ALL_CATEGORIES, "Escolares", "Empresariales"];

const FETCH_ERROR: &str = "Error al obtener productos";

/// Product catalog state container.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<CatalogStoreInner>,
}

struct CatalogStoreInner {
    api: ApiClient,
    fallback: FallbackPolicy,
    /// Sequence number of the most recent fetch or cancellation.
    sequence: AtomicU64,
    state: RwLock<CatalogState>,
}

#[derive(Debug)]
struct CatalogState {
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
    selected_category: String,
    selected_client: Option<ClientId>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            loading: false,
            error: None,
            selected_category: ALL_CATEGORIES.to_string(),
            selected_client: None,
        }
    }
}

impl CatalogStore {
    #[must_use]
    pub fn new(api: ApiClient, fallback: FallbackPolicy) -> Self {
        Self {
            inner: Arc::new(CatalogStoreInner {
                api,
                fallback,
                sequence: AtomicU64::new(0),
                state: RwLock::new(CatalogState::default()),
            }),
        }
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.inner.state.read().products.clone()
    }

    /// Look up a fetched product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.inner
            .state
            .read()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Products in the selected category, or all of them for
    /// [`ALL_CATEGORIES`].
    #[must_use]
    pub fn filtered_products(&self) -> Vec<Product> {
        let state = self.inner.state.read();
        if state.selected_category == ALL_CATEGORIES {
            return state.products.clone();
        }
        state
            .products
            .iter()
            .filter(|p| p.category_name() == Some(state.selected_category.as_str()))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        CATEGORIES.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn selected_category(&self) -> String {
        self.inner.state.read().selected_category.clone()
    }

    #[must_use]
    pub fn selected_client(&self) -> Option<ClientId> {
        self.inner.state.read().selected_client
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.inner.state.read().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.state.read().error.clone()
    }

    /// Set the category filter.
    pub fn set_category(&self, category: impl Into<String>) {
        let category = category.into();
        debug!(category = %category, "Category filter changed");
        self.inner.state.write().selected_category = category;
    }

    /// Select a client and fetch its products.
    ///
    /// Any fetch still in flight for the previous selection is superseded.
    #[instrument(skip(self))]
    pub async fn set_selected_client(&self, client_id: ClientId) -> FetchOutcome {
        self.inner.state.write().selected_client = Some(client_id);
        let id = client_id.to_string();
        add_breadcrumb("catalog", "Selected client", Some(&[("client_id", id.as_str())]));
        self.fetch_products().await
    }

    /// Discard the response of any fetch in flight and clear `loading`.
    pub fn cancel_pending(&self) {
        let mut state = self.inner.state.write();
        self.inner.sequence.fetch_add(1, Ordering::SeqCst);
        state.loading = false;
    }

    /// Fetch the selected client's products.
    ///
    /// Transport failures record the error and, under
    /// [`FallbackPolicy::SampleData`], replace the list with the built-in
    /// sample catalog.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> FetchOutcome {
        let (client_id, request) = {
            let mut state = self.inner.state.write();
            let Some(client_id) = state.selected_client else {
                warn!("No client selected");
                return FetchOutcome::Skipped;
            };
            state.loading = true;
            state.error = None;
            (client_id, self.inner.sequence.fetch_add(1, Ordering::SeqCst) + 1)
        };

        let result = self.inner.api.list_products(client_id).await;

        let mut state = self.inner.state.write();
        if self.inner.sequence.load(Ordering::SeqCst) != request {
            debug!(%client_id, request, "Discarding superseded product response");
            return FetchOutcome::Superseded;
        }
        state.loading = false;

        match result {
            Ok(envelope) => match envelope.into_result() {
                Ok(products) => {
                    let count = products.len();
                    state.products = products;
                    info!(%client_id, count, "Products loaded");
                    FetchOutcome::Loaded { count }
                }
                Err(message) => {
                    let message = message.unwrap_or_else(|| FETCH_ERROR.to_string());
                    warn!(%client_id, message = %message, "Backend rejected product request");
                    state.error = Some(message);
                    FetchOutcome::Rejected
                }
            },
            Err(e) => {
                state.error = Some(e.to_string());
                let outcome = if self.inner.fallback.uses_sample_data() {
                    state.products = sample_products();
                    FetchOutcome::Degraded
                } else {
                    FetchOutcome::Failed
                };
                drop(state);
                report_error("catalog", "fetch_products", &e);
                outcome
            }
        }
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("CatalogStore")
            .field("products", &state.products.len())
            .field("selected_client", &state.selected_client)
            .field("selected_category", &state.selected_category)
            .field("loading", &state.loading)
            .field("error", &state.error)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;

    fn unreachable_store(fallback: FallbackPolicy) -> CatalogStore {
        let config = StorefrontConfig::default()
            .with_api_url("http://127.0.0.1:9/api")
            .unwrap();
        CatalogStore::new(ApiClient::new(&config).unwrap(), fallback)
    }

    #[tokio::test]
    async fn test_fetch_without_client_is_skipped() {
        let store = unreachable_store(FallbackPolicy::SampleData);
        assert_eq!(store.fetch_products().await, FetchOutcome::Skipped);
        assert!(!store.loading());
        assert!(store.products().is_empty());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_to_samples() {
        let store = unreachable_store(FallbackPolicy::SampleData);
        let outcome = store.set_selected_client(ClientId::new(1)).await;
        assert_eq!(outcome, FetchOutcome::Degraded);
        assert_eq!(store.products().len(), 6);
        assert!(store.error().is_some());
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_transport_failure_without_fallback() {
        let store = unreachable_store(FallbackPolicy::Disabled);
        let outcome = store.set_selected_client(ClientId::new(1)).await;
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(store.products().is_empty());
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn test_category_filter() {
        let store = unreachable_store(FallbackPolicy::SampleData);
        store.set_selected_client(ClientId::new(1)).await;

        assert_eq!(store.selected_category(), ALL_CATEGORIES);
        assert_eq!(store.filtered_products().len(), 6);

        store.set_category("Empresariales");
        let filtered = store.filtered_products();
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|p| p.category_name() == Some("Empresariales")));

        // Matching is exact
        store.set_category("empresariales");
        assert!(store.filtered_products().is_empty());

        store.set_category(ALL_CATEGORIES);
        assert_eq!(store.filtered_products().len(), 6);
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let store = unreachable_store(FallbackPolicy::SampleData);
        store.set_selected_client(ClientId::new(1)).await;
        assert_eq!(
            store.product(ProductId::new(6)).map(|p| p.name),
            Some("Blazer Empresarial".to_string())
        );
        assert!(store.product(ProductId::new(60)).is_none());
    }

    #[test]
    fn test_categories() {
        let store = unreachable_store(FallbackPolicy::SampleData);
        assert_eq!(store.categories(), ["Todos", "Escolares", "Empresariales"]);
    }

    #[test]
    fn test_cancel_pending_clears_loading() {
        let store = unreachable_store(FallbackPolicy::SampleData);
        store.inner.state.write().loading = true;
        store.cancel_pending();
        assert!(!store.loading());
    }
}
