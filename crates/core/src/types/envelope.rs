//! The shop backend's response envelope.

use serde::{Deserialize, Serialize};

/// Response wrapper used by every shop endpoint:
/// `{ "success": bool, "data"?: T, "message"?: string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// The data on success, or the server message on failure.
    ///
    /// A successful envelope without data yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns the server message (if any) when `success` is false.
    pub fn into_result(self) -> Result<T, Option<String>>
    where
        T: Default,
    {
        if self.success {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(self.message.filter(|m| !m.is_empty()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_without_data() {
        let env: ApiEnvelope<Vec<i32>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(env.into_result(), Ok(Vec::new()));
    }

    #[test]
    fn test_envelope_failure_message() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success": false, "message": "Cliente inactivo"}"#).unwrap();
        assert_eq!(env.into_result(), Err(Some("Cliente inactivo".to_string())));
    }

    #[test]
    fn test_envelope_failure_blank_message() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success": false, "message": ""}"#).unwrap();
        assert_eq!(env.into_result(), Err(None));
    }
}
