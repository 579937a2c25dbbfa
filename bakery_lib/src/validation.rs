//! Admin form validation.
//!
//! Forms hold the raw text the user typed. `validate` collects every field
//! error at once and, on success, produces the request payload.

use std::fmt;

use bakery_api::types::{Category, CategoryID, CategoryPayload, Product, ProductPayload};
use serde::Serialize;
use url::Url;

pub const MAX_NAME_LENGTH: usize = 120;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Per-field error messages. A field is valid when its entry is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// `(field, message)` pairs in form order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("price", &self.price),
            ("stock", &self.stock),
            ("image_url", &self.image_url),
            ("category_id", &self.category_id),
        ]
        .into_iter()
        .filter_map(|(field, msg)| msg.as_deref().map(|m| (field, m)))
        .collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields()
            .into_iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Strip ASCII control characters other than newline and tab, then trim.
pub fn clean_text(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Required text field: non-empty after cleaning and within `max_len` characters.
fn required_text(input: &str, label: &str, max_len: usize) -> Result<String, String> {
    let cleaned = clean_text(input);
    if cleaned.is_empty() {
        return Err(format!("{} is required", label));
    }
    if cleaned.chars().count() > max_len {
        return Err(format!("{} must be at most {} characters", label, max_len));
    }
    Ok(cleaned)
}

/// Optional text field: `None` when blank, otherwise within `max_len` characters.
fn optional_text(input: &str, label: &str, max_len: usize) -> Result<Option<String>, String> {
    let cleaned = clean_text(input);
    if cleaned.is_empty() {
        return Ok(None);
    }
    if cleaned.chars().count() > max_len {
        return Err(format!("{} must be at most {} characters", label, max_len));
    }
    Ok(Some(cleaned))
}

fn parse_price(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err("Price must be greater than 0".to_string()),
    }
}

fn parse_stock(input: &str) -> Result<i64, String> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(stock) if stock >= 0 => Ok(stock),
        Ok(_) => Err("Stock cannot be negative".to_string()),
        Err(_) if trimmed.starts_with('-') => Err("Stock cannot be negative".to_string()),
        Err(_) => Err("Stock must be a whole number".to_string()),
    }
}

/// Blank means "let the backend pick an image". Anything else must be an absolute URL.
fn parse_image_url(input: &str) -> Result<Option<String>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Url::parse(trimmed)
        .map(|_| Some(trimmed.to_string()))
        .map_err(|_| "Image URL is not valid".to_string())
}

/// Validate a raw id argument (e.g. from a path segment): must be a positive integer.
pub fn validate_id(input: &str) -> Result<i64, crate::BakeryError> {
    match input.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(crate::BakeryError::InvalidInput(format!(
            "'{}' is not a valid id",
            input
        ))),
    }
}

/// Product create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    /// Optional. Left blank, the backend assigns an image.
    pub image_url: String,
    pub category_id: Option<CategoryID>,
}

impl ProductForm {
    /// Prefills the form from an existing product for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
            category_id: product
                .category_id
                .or_else(|| product.category.as_ref().map(|c| c.id)),
        }
    }

    pub fn validate(&self) -> Result<ProductPayload, FormErrors> {
        let mut errors = FormErrors::default();

        let name = check(
            required_text(&self.name, "Name", MAX_NAME_LENGTH),
            &mut errors.name,
        );
        let description = check(
            required_text(&self.description, "Description", MAX_DESCRIPTION_LENGTH),
            &mut errors.description,
        );
        let price = check(parse_price(&self.price), &mut errors.price);
        let stock = check(parse_stock(&self.stock), &mut errors.stock);
        let image_url = check(parse_image_url(&self.image_url), &mut errors.image_url);
        let category_id = check(
            self.category_id
                .filter(|id| *id > 0)
                .ok_or_else(|| "Category is required".to_string()),
            &mut errors.category_id,
        );

        match (name, description, price, stock, image_url, category_id) {
            (
                Some(name),
                Some(description),
                Some(price),
                Some(stock),
                Some(image_url),
                Some(category_id),
            ) => Ok(ProductPayload {
                name,
                description,
                price,
                stock,
                category_id,
                image_url,
            }),
            _ => Err(errors),
        }
    }
}

/// Category create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    /// Optional. Sent as `null` when blank.
    pub description: String,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }

    /// Validates the form. The payload leaves `is_active` unset; creation sets it.
    pub fn validate(&self) -> Result<CategoryPayload, FormErrors> {
        let mut errors = FormErrors::default();

        let name = check(
            required_text(&self.name, "Name", MAX_NAME_LENGTH),
            &mut errors.name,
        );
        let description = check(
            optional_text(&self.description, "Description", MAX_DESCRIPTION_LENGTH),
            &mut errors.description,
        );

        match (name, description) {
            (Some(name), Some(description)) => Ok(CategoryPayload {
                name,
                description,
                is_active: None,
            }),
            _ => Err(errors),
        }
    }
}

/// Records the error message in `slot` and discards the value.
fn check<T>(result: Result<T, String>, slot: &mut Option<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(msg) => {
            *slot = Some(msg);
            None
        }
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
