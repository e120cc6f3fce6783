//! Store error types with Sentry integration.
//!
//! Stores record failures as a last-write-wins message for the UI and also
//! report them here, so they reach the logs and (when configured) Sentry.

use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Error returned by store operations that touch the backend or storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Log an error a store has recorded and capture it to Sentry.
///
/// `store` names the store ("cart", "catalog", "clients").
pub fn report_error<E>(store: &str, action: &str, error: &E)
where
    E: std::error::Error + ?Sized,
{
    let event_id = sentry::capture_error(error);
    tracing::error!(
        store,
        action,
        error = %error,
        sentry_event_id = %event_id,
        "Store action failed"
    );
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "12")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::from(ApiError::Status(reqwest::StatusCode::NOT_FOUND));
        assert_eq!(
            err.to_string(),
            "API error: Request failed with status code 404"
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::from(StorageError::from(io));
        assert_eq!(err.to_string(), "Storage error: storage I/O error: denied");
    }

    #[test]
    fn test_reporting_without_sentry_is_noop() {
        // No Sentry client is bound in tests; these must not panic
        let err = ApiError::Status(reqwest::StatusCode::BAD_GATEWAY);
        report_error("cart", "checkout", &err);
        add_breadcrumb("cart", "Checkout", Some(&[("items", "0")]));
    }
}
