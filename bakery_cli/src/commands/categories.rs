use anyhow::Result;
use bakery_lib::Storefront;

use crate::output::{print_categories, OutputFormat};

pub async fn run(storefront: &Storefront, format: &OutputFormat) -> Result<()> {
    let categories = storefront.categories().await?;
    eprintln!("{} categories", categories.len());
    print_categories(&categories, format)
}
