//! Admin console: product and category maintenance.

use std::io::Write;

use anyhow::{bail, Result};
use bakery_lib::validation::validate_id;
use bakery_lib::{CategoryForm, ProductForm, Storefront};
use clap::{Args, Subcommand};

use crate::output::{print_categories, print_product_detail, print_products, OutputFormat};

#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List all products
    List,
    /// Create a product
    Create(ProductFields),
    /// Edit a product. Omitted fields keep their current value
    Update {
        /// Product ID
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List all categories
    List,
    /// Create a category
    Create(CategoryFields),
    /// Edit a category. Omitted fields keep their current value
    Update {
        /// Category ID
        id: String,
        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Delete a category
    Delete {
        /// Category ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Unit price, greater than 0
    #[arg(long)]
    pub price: Option<String>,

    /// Units in stock
    #[arg(long)]
    pub stock: Option<String>,

    /// Image URL. Pass an empty string to let the backend pick one
    #[arg(long)]
    pub image_url: Option<String>,

    /// Category ID
    #[arg(long)]
    pub category: Option<i64>,
}

impl ProductFields {
    fn apply_to(&self, form: &mut ProductForm) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(price) = &self.price {
            form.price = price.clone();
        }
        if let Some(stock) = &self.stock {
            form.stock = stock.clone();
        }
        if let Some(image_url) = &self.image_url {
            form.image_url = image_url.clone();
        }
        if self.category.is_some() {
            form.category_id = self.category;
        }
    }
}

#[derive(Args)]
pub struct CategoryFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Leave empty to clear the description
    #[arg(long)]
    pub description: Option<String>,
}

impl CategoryFields {
    fn apply_to(&self, form: &mut CategoryForm) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
    }
}

pub async fn run(args: &AdminArgs, storefront: &Storefront, format: &OutputFormat) -> Result<()> {
    match &args.command {
        AdminCommand::Products { action } => run_products(action, storefront, format).await,
        AdminCommand::Categories { action } => run_categories(action, storefront, format).await,
    }
}

async fn run_products(action: &ProductAction, storefront: &Storefront, format: &OutputFormat) -> Result<()> {
    let admin = storefront.admin();
    match action {
        ProductAction::List => {
            let products = admin.products().await?;
            eprintln!("{} products", products.len());
            print_products(&products, format)?;
        }
        ProductAction::Create(fields) => {
            let mut form = ProductForm::default();
            fields.apply_to(&mut form);
            match admin.create_product(&form).await? {
                Some(product) => print_product_detail(&product, format)?,
                None => eprintln!("Product created"),
            }
        }
        ProductAction::Update { id, fields } => {
            let id = validate_id(id)?;
            let Some(mut form) = admin.product_form(id).await? else {
                bail!("Product {} not found", id);
            };
            fields.apply_to(&mut form);
            match admin.update_product(id, &form).await? {
                Some(product) => print_product_detail(&product, format)?,
                None => eprintln!("Product {} updated", id),
            }
        }
        ProductAction::Delete { id, yes } => {
            let id = validate_id(id)?;
            if !yes && !confirm(&format!("Delete product {}?", id))? {
                eprintln!("Cancelled");
                return Ok(());
            }
            admin.delete_product(id).await?;
            eprintln!("Product {} deleted", id);
            let products = admin.products().await?;
            print_products(&products, format)?;
        }
    }
    Ok(())
}

async fn run_categories(
    action: &CategoryAction,
    storefront: &Storefront,
    format: &OutputFormat,
) -> Result<()> {
    let admin = storefront.admin();
    match action {
        CategoryAction::List => {
            let categories = admin.categories().await?;
            eprintln!("{} categories", categories.len());
            print_categories(&categories, format)?;
        }
        CategoryAction::Create(fields) => {
            let mut form = CategoryForm::default();
            fields.apply_to(&mut form);
            match admin.create_category(&form).await? {
                Some(category) => print_categories(std::slice::from_ref(&category), format)?,
                None => eprintln!("Category created"),
            }
        }
        CategoryAction::Update { id, fields } => {
            let id = validate_id(id)?;
            let Some(category) = admin.category(id).await? else {
                bail!("Category {} not found", id);
            };
            let mut form = CategoryForm::from_category(&category);
            fields.apply_to(&mut form);
            match admin.update_category(id, &form).await? {
                Some(category) => print_categories(std::slice::from_ref(&category), format)?,
                None => eprintln!("Category {} updated", id),
            }
        }
        CategoryAction::Delete { id, yes } => {
            let id = validate_id(id)?;
            if !yes && !confirm(&format!("Delete category {}?", id))? {
                eprintln!("Cancelled");
                return Ok(());
            }
            admin.delete_category(id).await?;
            eprintln!("Category {} deleted", id);
            let categories = admin.categories().await?;
            print_categories(&categories, format)?;
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
