use anyhow::Result;
use bakery_lib::Settings;
use clap::Args;

use crate::xml_output::{sitemap_xml, SITEMAP_PATHS};

#[derive(Args)]
pub struct SitemapArgs {
    /// Public site URL (defaults to BAKERY_SITE_URL)
    #[arg(long)]
    pub base_url: Option<String>,
}

pub fn run(args: &SitemapArgs, settings: &Settings) -> Result<()> {
    let base_url = args.base_url.as_deref().unwrap_or(&settings.site_url);
    println!("{}", sitemap_xml(base_url, &SITEMAP_PATHS)?);
    Ok(())
}
