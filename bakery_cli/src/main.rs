mod commands;
mod output;
mod xml_output;

use anyhow::Result;
use bakery_lib::{Settings, Storefront};
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "bakery")]
#[command(about = "Browse and manage the bakery catalog")]
struct Cli {
    /// Output format: table, json, csv, markdown or xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides BAKERY_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Featured products and categories
    Home,
    /// List products, one page at a time
    Products(commands::products::ProductsArgs),
    /// Show a single product
    Product(commands::product::ProductArgs),
    /// List categories
    Categories,
    /// Create, edit and delete products and categories
    Admin(commands::admin::AdminArgs),
    /// Print the storefront sitemap
    Sitemap(commands::sitemap::SitemapArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("bakery=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output)?;

    let mut settings = Settings::from_env();
    if let Some(api_url) = &cli.api_url {
        settings = settings.with_api_url(api_url);
    }
    tracing::debug!("Using API at {}", settings.api_url);

    let storefront = Storefront::new(settings);

    match &cli.command {
        Commands::Home => commands::home::run(&storefront, &format).await?,
        Commands::Products(args) => commands::products::run(args, &storefront, &format).await?,
        Commands::Product(args) => commands::product::run(args, &storefront, &format).await?,
        Commands::Categories => commands::categories::run(&storefront, &format).await?,
        Commands::Admin(args) => commands::admin::run(args, &storefront, &format).await?,
        Commands::Sitemap(args) => commands::sitemap::run(args, storefront.settings())?,
    }

    Ok(())
}
