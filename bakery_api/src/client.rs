//! HTTP client for the bakery REST API.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
    query::{ProductQuery, Query},
    types::{
        strip_envelope, unwrap_item, Category, CategoryID, CategoryPayload, ListEnvelope, Page,
        Product, ProductID, ProductPayload,
    },
    Error,
};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "https://backend-jxwq.onrender.com/api";

/// Method, headers, and body for a single request. Defaults to a bare `GET`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    /// A request of the given method with no body.
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// A request carrying `body` serialized as JSON.
    pub fn json<T: Serialize>(method: Method, body: &T) -> Result<Self, Error> {
        let body = serde_json::to_string(body).map_err(|e| {
            tracing::error!("Failed to serialize request body: {}", e);
            Error::Encode(e.to_string())
        })?;
        Ok(Self::method(method)
            .with_header("content-type", "application/json")
            .with_body(body))
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP client for the bakery REST API.
///
/// Every response goes through [`Client::fetch`], which turns non-success
/// statuses into [`Error::HttpStatus`] and strips the `{ success, data }`
/// envelope. List endpoints then classify what is left with [`ListEnvelope`].
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Endpoints are appended verbatim.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at [`DEFAULT_API_URL`].
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Creates a new client with a custom base URL. Used for configuration and
    /// for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_api_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, endpoint: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, endpoint).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    /// Performs a request against `base_url + endpoint` and returns the
    /// normalized JSON payload.
    ///
    /// A `{ success, data }` object is reduced to its `data`; any other JSON
    /// value is returned unchanged. An empty success body yields `Value::Null`.
    pub async fn fetch(&self, endpoint: &str, options: RequestOptions) -> Result<Value, Error> {
        let url = self.get_url(endpoint)?;
        self.fetch_url(url, options).await
    }

    async fn fetch_url(&self, url: Url, options: RequestOptions) -> Result<Value, Error> {
        tracing::debug!("{} {}", options.method, url);
        let mut request = self.http.request(options.method, url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            tracing::error!(
                "Request failed with status {}: {}",
                status,
                truncate_body(&body)
            );
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        let parsed = serde_json::from_str::<Value>(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse response: {} | body: {}",
                e,
                truncate_body(&body)
            );
            Error::Decode(e.to_string())
        })?;

        Ok(strip_envelope(parsed))
    }

    async fn get_item<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        let value = self.fetch(endpoint, RequestOptions::default()).await?;
        decode(unwrap_item(value))
    }

    async fn send_json<B, T>(&self, endpoint: &str, method: Method, body: &B) -> Result<Option<T>, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let value = self
            .fetch(endpoint, RequestOptions::json(method, body)?)
            .await?;
        // The write already succeeded; an unexpected echo is not an error.
        match decode::<T>(unwrap_item(value)) {
            Ok(item) => Ok(Some(item)),
            Err(e) => {
                tracing::debug!("Ignoring undecodable write response for {}: {}", endpoint, e);
                Ok(None)
            }
        }
    }

    async fn delete(&self, endpoint: &str) -> Result<(), Error> {
        self.fetch(endpoint, RequestOptions::method(Method::DELETE))
            .await
            .map(|_| ())
    }

    /// Fetches one page of products matching the given query.
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Page<Product>, Error> {
        let url = query.add_to_url(&self.get_url("/products")?);
        let value = self.fetch_url(url, RequestOptions::default()).await?;
        ListEnvelope::classify(value).into_page()
    }

    /// Fetches a single product by its numeric ID.
    pub async fn get_product(&self, product_id: ProductID) -> Result<Product, Error> {
        self.get_item(format!("/products/{}", product_id).as_str())
            .await
    }

    /// Creates a product. Returns the stored product when the backend echoes it.
    pub async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<Option<Product>, Error> {
        self.send_json("/products", Method::POST, payload).await
    }

    /// Replaces a product. Returns the stored product when the backend echoes it.
    pub async fn update_product(
        &self,
        product_id: ProductID,
        payload: &ProductPayload,
    ) -> Result<Option<Product>, Error> {
        self.send_json(
            format!("/products/{}", product_id).as_str(),
            Method::PUT,
            payload,
        )
        .await
    }

    pub async fn delete_product(&self, product_id: ProductID) -> Result<(), Error> {
        self.delete(format!("/products/{}", product_id).as_str())
            .await
    }

    /// Fetches all categories. The endpoint is not paginated.
    pub async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        let value = self.fetch("/categorias", RequestOptions::default()).await?;
        Ok(ListEnvelope::classify(value).into_page()?.items)
    }

    /// Fetches a single category by its numeric ID.
    pub async fn get_category(&self, category_id: CategoryID) -> Result<Category, Error> {
        self.get_item(format!("/categorias/{}", category_id).as_str())
            .await
    }

    pub async fn create_category(
        &self,
        payload: &CategoryPayload,
    ) -> Result<Option<Category>, Error> {
        self.send_json("/categorias", Method::POST, payload).await
    }

    pub async fn update_category(
        &self,
        category_id: CategoryID,
        payload: &CategoryPayload,
    ) -> Result<Option<Category>, Error> {
        self.send_json(
            format!("/categorias/{}", category_id).as_str(),
            Method::PUT,
            payload,
        )
        .await
    }

    pub async fn delete_category(&self, category_id: CategoryID) -> Result<(), Error> {
        self.delete(format!("/categorias/{}", category_id).as_str())
            .await
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!("Failed to decode resource: {}", e);
        Error::Decode(e.to_string())
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("Not found"), "Not found");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "ñ".repeat(1500);
        let snippet = truncate_body(&body);
        assert!(snippet.ends_with("...[truncated]"));
        assert!(snippet.len() < body.len());
    }

    #[test]
    fn json_options_set_content_type() {
        let options = RequestOptions::json(Method::POST, &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(options.method, Method::POST);
        assert_eq!(options.body.as_deref(), Some(r#"{"a":1}"#));
        assert!(options
            .headers
            .iter()
            .any(|(k, v)| k == "content-type" && v == "application/json"));
    }

    #[test]
    fn unserializable_body_is_an_encode_error() {
        let mut body = std::collections::BTreeMap::new();
        body.insert((1, 2), "tuple keys are not valid JSON object keys");
        let err = RequestOptions::json(Method::POST, &body).unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
        assert!(err.to_string().starts_with("Failed to encode request body"));
    }

    #[test]
    fn url_is_plain_concatenation() {
        let client = Client::with_base_url("http://localhost:4000/api");
        let url = client.get_url("/categorias/7").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/categorias/7");
    }
}
