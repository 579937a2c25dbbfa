//! Response envelopes.
//!
//! The backend wraps payloads inconsistently: bare arrays, `{ data }` or
//! `{ rows }` objects, `{ success, data }` objects, and paginated objects with
//! a `pagination` block. Everything is classified here, once, so callers only
//! ever see a bare item or a [`Page`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Error;

/// Strips the outermost `{ success, data }` envelope. Any other value is
/// returned unchanged, including `{ data }` without a `success` marker.
pub fn strip_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("success") && map.contains_key("data") => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

/// Unwraps a single-item payload that is still nested under `data`.
///
/// Item endpoints sometimes answer `{ data: {...} }` without a `success`
/// marker. An object that carries its own `id` is treated as the item itself.
pub fn unwrap_item(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if !map.contains_key("id") && matches!(map.get("data"), Some(Value::Object(_))) =>
        {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

/// Pagination metadata for a single page of results.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Current page, 1-indexed.
    pub page: i64,
    /// Page size reported by the backend, if any.
    pub size: Option<i64>,
    pub total_items: i64,
    /// Never below 1.
    pub total_pages: i64,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: 1,
            size: None,
            total_items: 0,
            total_pages: 1,
        }
    }
}

impl Paging {
    /// Reads a `pagination` block. Missing or non-numeric fields fall back to
    /// total 0, pages 1, page 1.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Paging::default();
        Paging {
            page: first_number(value, &["page", "currentPage"]).unwrap_or(defaults.page),
            size: first_number(value, &["limit", "pageSize"]),
            total_items: first_number(value, &["total", "totalItems"])
                .unwrap_or(defaults.total_items),
            total_pages: first_number(value, &["pages", "totalPages"])
                .unwrap_or(defaults.total_pages),
        }
        .clamped()
    }

    /// Forces `total_pages >= 1` and `page` into `[1, total_pages]`.
    pub fn clamped(self) -> Self {
        let total_pages = self.total_pages.max(1);
        Paging {
            page: self.page.clamp(1, total_pages),
            total_pages,
            total_items: self.total_items.max(0),
            ..self
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

fn first_number(value: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// One page of decoded items plus its pagination metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub paging: Paging,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            paging: Paging::default(),
        }
    }
}

/// Every list shape the backend is known to return.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEnvelope {
    /// `[...]`
    Bare(Vec<Value>),
    /// `{ data | rows: [...], pagination: {...} }`
    Paginated { items: Vec<Value>, paging: Paging },
    /// `{ data | rows: [...] }`
    Keyed(Vec<Value>),
    /// Anything else. Decodes to an empty page.
    Unrecognized(Value),
}

impl ListEnvelope {
    /// Classifies an already normalized list payload (see [`strip_envelope`]).
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => ListEnvelope::Bare(items),
            Value::Object(mut map) => {
                let keyed = map.contains_key("data") || map.contains_key("rows");
                let items = take_items(&mut map);
                match map.get("pagination") {
                    Some(pagination) => ListEnvelope::Paginated {
                        items,
                        paging: Paging::from_value(pagination),
                    },
                    None if keyed => ListEnvelope::Keyed(items),
                    None => ListEnvelope::Unrecognized(Value::Object(map)),
                }
            }
            other => ListEnvelope::Unrecognized(other),
        }
    }

    /// Decodes the items into `T`. Only a per-item type mismatch is an error;
    /// unexpected envelope shapes decode to an empty page.
    pub fn into_page<T: DeserializeOwned>(self) -> Result<Page<T>, Error> {
        let (items, paging) = match self {
            ListEnvelope::Bare(items) | ListEnvelope::Keyed(items) => (items, Paging::default()),
            ListEnvelope::Paginated { items, paging } => (items, paging),
            ListEnvelope::Unrecognized(value) => {
                tracing::debug!("Unrecognized list payload, treating as empty: {}", value);
                (Vec::new(), Paging::default())
            }
        };
        let items = serde_json::from_value::<Vec<T>>(Value::Array(items))
            .map_err(|e| Error::Decode(e.to_string()))?;
        Ok(Page { items, paging })
    }
}

/// Takes the first of `data` / `rows` that is an array.
fn take_items(map: &mut Map<String, Value>) -> Vec<Value> {
    for key in ["data", "rows"] {
        if matches!(map.get(key), Some(Value::Array(_))) {
            if let Some(Value::Array(items)) = map.remove(key) {
                return items;
            }
        }
    }
    Vec::new()
}
