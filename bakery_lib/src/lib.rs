//! Library layer for the bakery storefront: configuration, the paged product
//! list controller, storefront and admin services, and form validation.
//!
//! Wraps the `bakery_api` crate, which owns the HTTP client and the response
//! envelope handling.

pub mod admin;
pub mod config;
pub mod controller;
pub mod error;
pub mod storefront;
pub mod validation;

pub use bakery_api;
pub use bakery_api::types;
pub use bakery_api::{Client, ProductQuery, Query};

pub use admin::Admin;
pub use config::Settings;
pub use controller::{LoadState, PagedListController, Ticket};
pub use error::BakeryError;
pub use storefront::{HomePage, Storefront};
pub use validation::{CategoryForm, FormErrors, ProductForm};
