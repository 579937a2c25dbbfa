//! Product types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::category::{Category, CategoryID};
use super::lenient::{lenient_count, lenient_timestamp, null_as_default};

/// Numeric identifier for a product.
pub type ProductID = i64;

/// A product as returned by `/products` and `/products/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductID,

    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Unit price. Decimal columns come back as strings on some backends.
    #[serde(deserialize_with = "deserialize_decimal")]
    pub price: f64,

    #[serde(default, deserialize_with = "lenient_count")]
    pub stock: i64,

    /// Image URL. The backend assigns one when a product is created without it.
    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub category_id: Option<CategoryID>,

    /// Populated when the backend includes the relation.
    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Name of the populated category, falling back to the raw category id.
    pub fn category_label(&self) -> Option<String> {
        match (&self.category, self.category_id) {
            (Some(category), _) => Some(category.name.clone()),
            (None, Some(id)) => Some(id.to_string()),
            (None, None) => None,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Request body for `POST /products` and `PUT /products/{id}`.
///
/// `image_url` is omitted entirely when `None`, which tells the backend to
/// pick an image itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: CategoryID,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A decimal that may arrive as a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Number(f64),
    Text(String),
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Decimal::deserialize(deserializer)? {
        Decimal::Number(n) => Ok(n),
        Decimal::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal '{}'", s))),
    }
}
