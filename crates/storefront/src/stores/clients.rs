//! Client registry store.
//!
//! Lists the client organizations and remembers which one the shopper
//! picked. The selection is the only state that survives a restart: it is
//! written to [`ScalarStorage`] under [`SELECTED_CLIENT_KEY`] as a decimal
//! string.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, instrument, warn};

use uniformes_core::{Client, ClientId};

use super::FetchOutcome;
use crate::api::ApiClient;
use crate::error::{Result, add_breadcrumb, report_error};
use crate::fallback::{FallbackPolicy, sample_clients};
use crate::storage::{SELECTED_CLIENT_KEY, ScalarStorage};

const FETCH_ERROR: &str = "Error al obtener clientes";

/// Client registry state container.
#[derive(Clone)]
pub struct ClientStore {
    inner: Arc<ClientStoreInner>,
}

struct ClientStoreInner {
    api: ApiClient,
    storage: Arc<dyn ScalarStorage>,
    fallback: FallbackPolicy,
    state: RwLock<ClientState>,
}

#[derive(Debug, Default)]
struct ClientState {
    clients: Vec<Client>,
    loading: bool,
    error: Option<String>,
    selected_client: Option<ClientId>,
}

impl ClientStore {
    #[must_use]
    pub fn new(
        api: ApiClient,
        storage: Arc<dyn ScalarStorage>,
        fallback: FallbackPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(ClientStoreInner {
                api,
                storage,
                fallback,
                state: RwLock::new(ClientState::default()),
            }),
        }
    }

    #[must_use]
    pub fn clients(&self) -> Vec<Client> {
        self.inner.state.read().clients.clone()
    }

    #[must_use]
    pub fn selected_client(&self) -> Option<ClientId> {
        self.inner.state.read().selected_client
    }

    /// The selected client's record, if it is in the fetched list.
    #[must_use]
    pub fn selected(&self) -> Option<Client> {
        let state = self.inner.state.read();
        let id = state.selected_client?;
        state.clients.iter().find(|c| c.id == id).cloned()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.inner.state.read().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.state.read().error.clone()
    }

    /// Fetch the client list.
    ///
    /// Any failure, whether the backend rejects the request or can't be
    /// reached, records the error and (under [`FallbackPolicy::SampleData`])
    /// substitutes the two sample clients.
    #[instrument(skip(self))]
    pub async fn fetch_clients(&self) -> FetchOutcome {
        {
            let mut state = self.inner.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.inner.api.list_clients().await;

        let message = match result {
            Ok(envelope) => match envelope.into_result() {
                Ok(clients) => {
                    let count = clients.len();
                    let mut state = self.inner.state.write();
                    state.clients = clients;
                    state.loading = false;
                    drop(state);
                    info!(count, "Clients loaded");
                    return FetchOutcome::Loaded { count };
                }
                Err(message) => {
                    let message = message.unwrap_or_else(|| FETCH_ERROR.to_string());
                    warn!(message = %message, "Backend rejected client request");
                    message
                }
            },
            Err(e) => {
                report_error("clients", "fetch_clients", &e);
                e.to_string()
            }
        };

        let mut state = self.inner.state.write();
        state.loading = false;
        state.error = Some(message);
        if self.inner.fallback.uses_sample_data() {
            state.clients = sample_clients();
            FetchOutcome::Degraded
        } else {
            FetchOutcome::Failed
        }
    }

    /// Select a client and persist the choice.
    ///
    /// The in-memory selection changes even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the selection cannot be written.
    pub fn set_selected_client(&self, client_id: ClientId) -> Result<()> {
        self.inner.state.write().selected_client = Some(client_id);

        let id = client_id.to_string();
        add_breadcrumb("clients", "Selected client", Some(&[("client_id", id.as_str())]));
        self.inner.storage.set(SELECTED_CLIENT_KEY, &id)?;
        Ok(())
    }

    /// Forget the selection, in memory and in storage.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the stored value cannot be removed.
    pub fn clear_selected_client(&self) -> Result<()> {
        self.inner.state.write().selected_client = None;
        self.inner.storage.remove(SELECTED_CLIENT_KEY)?;
        Ok(())
    }

    /// Restore the persisted selection.
    ///
    /// Returns the restored id. A stored value that isn't an integer is
    /// logged and ignored. The id is not checked against the client list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if storage cannot be read.
    pub fn load_selected_client(&self) -> Result<Option<ClientId>> {
        let Some(saved) = self.inner.storage.get(SELECTED_CLIENT_KEY)? else {
            return Ok(None);
        };

        match saved.parse::<ClientId>() {
            Ok(client_id) => {
                self.inner.state.write().selected_client = Some(client_id);
                info!(%client_id, "Restored client selection");
                Ok(Some(client_id))
            }
            Err(e) => {
                warn!(value = %saved, error = %e, "Ignoring unparseable stored client selection");
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for ClientStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("ClientStore")
            .field("clients", &state.clients.len())
            .field("selected_client", &state.selected_client)
            .field("loading", &state.loading)
            .field("error", &state.error)
            .finish_non_exhaustive()
    }
}
