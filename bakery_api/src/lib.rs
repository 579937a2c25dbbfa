mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, RequestOptions, DEFAULT_API_URL};
pub use reqwest::Method;
pub use self::errors::Error;
pub use self::query::{ProductQuery, Query};
