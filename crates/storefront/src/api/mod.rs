//! REST client for the shop backend.
//!
//! # Endpoints
//!
//! ```text
//! GET  {api}/shop/clients                 - Client organizations
//! GET  {api}/shop/products?client_id=<id> - Products for one client
//! POST {api}/checkout                     - Submit { items, total }
//! ```
//!
//! The list endpoints answer with an [`ApiEnvelope`](uniformes_core::ApiEnvelope);
//! checkout returns whatever payload the backend chooses. A non-2xx status is
//! reported as [`ApiError::Status`], the same class as a connection failure.

mod client;

pub use client::{ApiClient, CheckoutRequest};

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the shop backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS or timeout failure.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status code.
    #[error("Request failed with status code {}", .0.as_u16())]
    Status(StatusCode),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }

    #[test]
    fn test_parse_error_display() {
        let Err(source) = serde_json::from_str::<serde_json::Value>("{") else {
            panic!("expected parse failure");
        };
        let err = ApiError::from(source);
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
