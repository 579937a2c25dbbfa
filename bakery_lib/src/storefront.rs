//! Read-only storefront views: home page, category list, product detail.

use bakery_api::types::{Category, Product, ProductID};
use bakery_api::{Client, ProductQuery, Query};
use serde::Serialize;

use crate::admin::Admin;
use crate::config::Settings;
use crate::controller::PagedListController;
use crate::error::BakeryError;

/// Data for the home page.
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub featured: Vec<Product>,
    pub categories: Vec<Category>,
}

/// Entry point for storefront and admin operations against one backend.
pub struct Storefront {
    client: Client,
    settings: Settings,
}

impl Storefront {
    pub fn new(settings: Settings) -> Self {
        Self {
            client: Client::with_base_url(&settings.api_url),
            settings,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Admin operations sharing this storefront's client.
    pub fn admin(&self) -> Admin<'_> {
        Admin::new(&self.client, self.settings.admin_limit)
    }

    /// A product list controller sized from the settings.
    pub fn product_list(&self) -> PagedListController {
        PagedListController::new(self.settings.page_size)
    }

    /// Featured products followed by all categories.
    pub async fn home(&self) -> Result<HomePage, BakeryError> {
        let query = ProductQuery::default().with_limit(self.settings.featured_limit);
        let featured = self.client.get_products(&query).await?.items;
        let categories = self.client.get_categories().await?;
        Ok(HomePage {
            featured,
            categories,
        })
    }

    pub async fn categories(&self) -> Result<Vec<Category>, BakeryError> {
        Ok(self.client.get_categories().await?)
    }

    /// Product detail. A 404 is `Ok(None)`; other failures are errors.
    pub async fn product(&self, product_id: ProductID) -> Result<Option<Product>, BakeryError> {
        match self.client.get_product(product_id).await {
            Ok(product) => Ok(Some(product)),
            Err(e) => {
                let err = BakeryError::from(e);
                if err.is_not_found() {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }
}
