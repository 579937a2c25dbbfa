use anyhow::{bail, Result};
use bakery_lib::{LoadState, PagedListController, Storefront};
use clap::Args;

use crate::output::{print_products, OutputFormat};

#[derive(Args)]
pub struct ProductsArgs {
    /// Filter by category ID
    #[arg(long)]
    pub category: Option<i64>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page (defaults to BAKERY_PAGE_SIZE or 12)
    #[arg(long)]
    pub page_size: Option<i64>,
}

pub async fn run(args: &ProductsArgs, storefront: &Storefront, format: &OutputFormat) -> Result<()> {
    let mut controller = match args.page_size {
        Some(size) => PagedListController::new(size),
        None => storefront.product_list(),
    }
    .with_category(args.category);

    let ticket = controller.go_to_page(args.page);
    controller.load_if(storefront.client(), ticket).await;

    if controller.state() == LoadState::Failed {
        bail!("{}", controller.error().unwrap_or_default());
    }

    eprintln!(
        "Page {}/{} ({} total products)",
        controller.current_page(),
        controller.total_pages(),
        controller.total_items()
    );

    if controller.is_empty() && matches!(format, OutputFormat::Table | OutputFormat::Markdown) {
        eprintln!("No products found");
        return Ok(());
    }

    print_products(controller.items(), format)
}
