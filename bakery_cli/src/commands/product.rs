use anyhow::{bail, Result};
use bakery_lib::validation::validate_id;
use bakery_lib::Storefront;
use clap::Args;

use crate::output::{print_product_detail, OutputFormat};

#[derive(Args)]
pub struct ProductArgs {
    /// Product ID
    pub id: String,
}

pub async fn run(args: &ProductArgs, storefront: &Storefront, format: &OutputFormat) -> Result<()> {
    let id = validate_id(&args.id)?;
    match storefront.product(id).await? {
        Some(product) => print_product_detail(&product, format),
        None => bail!("Product {} not found", id),
    }
}
