//! Admin console operations: product and category CRUD behind form validation.

use bakery_api::types::{Category, CategoryID, Product, ProductID};
use bakery_api::{Client, ProductQuery, Query};

use crate::error::BakeryError;
use crate::validation::{CategoryForm, ProductForm};

/// Admin operations. Borrow one from [`crate::Storefront::admin`].
pub struct Admin<'a> {
    client: &'a Client,
    list_limit: i64,
}

impl<'a> Admin<'a> {
    pub fn new(client: &'a Client, list_limit: i64) -> Self {
        Self { client, list_limit }
    }

    /// All products for the admin table, up to the configured limit.
    pub async fn products(&self) -> Result<Vec<Product>, BakeryError> {
        let query = ProductQuery::default().with_limit(self.list_limit);
        Ok(self.client.get_products(&query).await?.items)
    }

    /// Loads a product into an edit form. `None` when it does not exist.
    pub async fn product_form(&self, product_id: ProductID) -> Result<Option<ProductForm>, BakeryError> {
        match self.client.get_product(product_id).await {
            Ok(product) => Ok(Some(ProductForm::from_product(&product))),
            Err(e) => not_found_as_none(e),
        }
    }

    /// Validates and creates a product. Returns the stored product when the
    /// backend echoes it back.
    pub async fn create_product(&self, form: &ProductForm) -> Result<Option<Product>, BakeryError> {
        let payload = form.validate()?;
        let created = self.client.create_product(&payload).await?;
        tracing::info!("Created product '{}'", payload.name);
        Ok(created)
    }

    pub async fn update_product(
        &self,
        product_id: ProductID,
        form: &ProductForm,
    ) -> Result<Option<Product>, BakeryError> {
        let payload = form.validate()?;
        let updated = self.client.update_product(product_id, &payload).await?;
        tracing::info!("Updated product {}", product_id);
        Ok(updated)
    }

    pub async fn delete_product(&self, product_id: ProductID) -> Result<(), BakeryError> {
        self.client.delete_product(product_id).await?;
        tracing::info!("Deleted product {}", product_id);
        Ok(())
    }

    pub async fn categories(&self) -> Result<Vec<Category>, BakeryError> {
        Ok(self.client.get_categories().await?)
    }

    /// A single category. `None` when it does not exist.
    pub async fn category(&self, category_id: CategoryID) -> Result<Option<Category>, BakeryError> {
        match self.client.get_category(category_id).await {
            Ok(category) => Ok(Some(category)),
            Err(e) => not_found_as_none(e),
        }
    }

    /// Validates and creates a category. New categories are always active.
    pub async fn create_category(&self, form: &CategoryForm) -> Result<Option<Category>, BakeryError> {
        let mut payload = form.validate()?;
        payload.is_active = Some(true);
        let created = self.client.create_category(&payload).await?;
        tracing::info!("Created category '{}'", payload.name);
        Ok(created)
    }

    pub async fn update_category(
        &self,
        category_id: CategoryID,
        form: &CategoryForm,
    ) -> Result<Option<Category>, BakeryError> {
        let payload = form.validate()?;
        let updated = self.client.update_category(category_id, &payload).await?;
        tracing::info!("Updated category {}", category_id);
        Ok(updated)
    }

    pub async fn delete_category(&self, category_id: CategoryID) -> Result<(), BakeryError> {
        self.client.delete_category(category_id).await?;
        tracing::info!("Deleted category {}", category_id);
        Ok(())
    }
}

fn not_found_as_none<T>(e: bakery_api::Error) -> Result<Option<T>, BakeryError> {
    let err = BakeryError::from(e);
    if err.is_not_found() {
        Ok(None)
    } else {
        Err(err)
    }
}
