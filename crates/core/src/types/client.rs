//! Client organization records.
//!
//! A client is a school or company whose uniforms the shop sells. Records
//! are mirrored verbatim from the backend; fields this crate doesn't model
//! are kept in `extra` so nothing is lost when a record is re-serialized.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ClientId;

/// A client organization served by the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub city: Option<String>,
    pub established_year: Option<i32>,
    /// Banner or logo image URL.
    pub image: Option<String>,
    /// Backend fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
