//! Category types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient::lenient_timestamp;

/// Numeric identifier for a category.
pub type CategoryID = i64;

/// A product category as returned by `/categorias`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryID,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Missing on older records; treated as active.
    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// Request body for `POST /categorias` and `PUT /categorias/{id}`.
///
/// `description` is always sent, as `null` when blank. `is_active` is only
/// sent when set, which create does and update does not.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
