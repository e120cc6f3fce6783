//! Integration tests for the Uniformes storefront.
//!
//! The tests drive the real stores against [`MockBackend`], an in-process
//! axum server speaking the shop API:
//!
//! ```text
//! GET  /api/shop/clients
//! GET  /api/shop/products?client_id={id}
//! POST /api/checkout
//! ```
//!
//! Each route answers with a configurable [`MockResponse`]. Checkout bodies
//! and product queries are recorded for assertions.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p uniformes-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use uniformes_storefront::api::ApiError;
use uniformes_storefront::config::{ConfigError, StorefrontConfig};
use uniformes_storefront::fallback::FallbackPolicy;
use uniformes_storefront::state::AppState;
use uniformes_storefront::storage::{MemoryStorage, ScalarStorage};

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: String,
}

impl MockResponse {
    /// `200` with a JSON body.
    #[must_use]
    pub fn json(body: &Value) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    /// Any status with a JSON body.
    #[must_use]
    pub fn with_status(status: StatusCode, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// `{"success": true, "data": data}`.
    #[must_use]
    pub fn ok(data: &Value) -> Self {
        Self::json(&json!({ "success": true, "data": data }))
    }

    /// `{"success": false, "message": message}`, or no message at all.
    #[must_use]
    pub fn rejected(message: Option<&str>) -> Self {
        match message {
            Some(message) => Self::json(&json!({ "success": false, "message": message })),
            None => Self::json(&json!({ "success": false })),
        }
    }

    /// `200` with an empty body.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            body: String::new(),
        }
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

#[derive(Debug)]
struct MockState {
    clients: Mutex<MockResponse>,
    products: Mutex<HashMap<i32, MockResponse>>,
    product_delays: Mutex<HashMap<i32, Duration>>,
    checkout: Mutex<MockResponse>,
    checkout_delay: Mutex<Option<Duration>>,
    product_queries: Mutex<Vec<i32>>,
    checkout_bodies: Mutex<Vec<Value>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            clients: Mutex::new(MockResponse::ok(&json!([]))),
            products: Mutex::new(HashMap::new()),
            product_delays: Mutex::new(HashMap::new()),
            checkout: Mutex::new(MockResponse::ok(&json!({ "orderId": 1 }))),
            checkout_delay: Mutex::new(None),
            product_queries: Mutex::new(Vec::new()),
            checkout_bodies: Mutex::new(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductQuery {
    client_id: i32,
}

/// An in-process shop backend listening on a random local port.
///
/// The server stops when the handle is dropped.
#[derive(Debug)]
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to `127.0.0.1:0` and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/api/shop/clients", get(clients))
            .route("/api/shop/products", get(products))
            .route("/api/checkout", post(checkout))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock backend stopped");
            }
        });

        Ok(Self { addr, state, task })
    }

    /// Base URL including the `/api` segment.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn set_clients(&self, response: MockResponse) {
        *self.state.clients.lock() = response;
    }

    /// Response for `client_id`. Unconfigured clients get an empty list.
    pub fn set_products(&self, client_id: i32, response: MockResponse) {
        self.state.products.lock().insert(client_id, response);
    }

    /// Hold the products response for `client_id` back for `delay`.
    pub fn delay_products(&self, client_id: i32, delay: Duration) {
        self.state.product_delays.lock().insert(client_id, delay);
    }

    pub fn set_checkout(&self, response: MockResponse) {
        *self.state.checkout.lock() = response;
    }

    /// Hold checkout responses back for `delay`. The body is recorded on
    /// arrival.
    pub fn delay_checkout(&self, delay: Duration) {
        *self.state.checkout_delay.lock() = Some(delay);
    }

    /// `client_id` of every products request, in arrival order.
    #[must_use]
    pub fn product_queries(&self) -> Vec<i32> {
        self.state.product_queries.lock().clone()
    }

    /// Every checkout body received, in arrival order.
    #[must_use]
    pub fn checkout_bodies(&self) -> Vec<Value> {
        self.state.checkout_bodies.lock().clone()
    }

    /// A session talking to this backend with in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn session(&self, fallback: FallbackPolicy) -> Result<AppState, SessionError> {
        self.session_with_storage(fallback, Arc::new(MemoryStorage::new()))
    }

    /// A session talking to this backend with the given storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is rejected or the HTTP client cannot be
    /// built.
    pub fn session_with_storage(
        &self,
        fallback: FallbackPolicy,
        storage: Arc<dyn ScalarStorage>,
    ) -> Result<AppState, SessionError> {
        let mut config = StorefrontConfig::default().with_api_url(&self.api_url())?;
        config.fallback = fallback;
        Ok(AppState::with_storage(config, storage)?)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Failure to build a test session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A product record in the backend's nested shape.
#[must_use]
pub fn product_json(id: i32, name: &str, price: &str, category: &str, sizes: &[(i32, &str)]) -> Value {
    let sizes: Vec<Value> = sizes
        .iter()
        .map(|(size_id, label)| json!({ "id": size_id, "size": label, "price": price }))
        .collect();
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} de prueba"),
        "price": price,
        "category": { "id": 1, "name": category },
        "image": null,
        "media": { "main": format!("/media/products/{id}.jpg"), "gallery": [] },
        "sizes": sizes,
    })
}

/// A client record.
#[must_use]
pub fn client_json(id: i32, name: &str, city: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "city": city,
        "established_year": 1990,
        "image": null,
    })
}

async fn clients(State(mock): State<Arc<MockState>>) -> MockResponse {
    mock.clients.lock().clone()
}

async fn products(
    State(mock): State<Arc<MockState>>,
    Query(query): Query<ProductQuery>,
) -> MockResponse {
    mock.product_queries.lock().push(query.client_id);

    let delay = mock.product_delays.lock().get(&query.client_id).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    mock.products
        .lock()
        .get(&query.client_id)
        .cloned()
        .unwrap_or_else(|| MockResponse::ok(&json!([])))
}

async fn checkout(State(mock): State<Arc<MockState>>, Json(body): Json<Value>) -> MockResponse {
    mock.checkout_bodies.lock().push(body);

    let delay = *mock.checkout_delay.lock();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    mock.checkout.lock().clone()
}
