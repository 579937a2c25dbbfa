use anyhow::Result;
use bakery_lib::Storefront;

use crate::output::{print_categories, print_json, print_products, OutputFormat};

pub async fn run(storefront: &Storefront, format: &OutputFormat) -> Result<()> {
    let home = storefront.home().await?;

    if *format == OutputFormat::Json {
        print_json(&home);
        return Ok(());
    }

    eprintln!("Featured products ({})", home.featured.len());
    print_products(&home.featured, format)?;
    eprintln!("Categories ({})", home.categories.len());
    print_categories(&home.categories, format)?;
    Ok(())
}
