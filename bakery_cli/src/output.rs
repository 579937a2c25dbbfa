use anyhow::{bail, Result};
use bakery_lib::types::{Category, Product};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::xml_output;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "xml" => Ok(OutputFormat::Xml),
            other => bail!(
                "Unknown output format '{}'. Expected table, json, csv, markdown or xml",
                other
            ),
        }
    }
}

#[derive(Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    #[serde(rename = "Stock")]
    stock: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
}

// -- Row builders --

fn build_product_rows(products: &[Product]) -> Vec<ProductRow> {
    products
        .iter()
        .map(|p| ProductRow {
            id: p.id,
            name: p.name.clone(),
            category: p.category_label().unwrap_or_else(|| "-".to_string()),
            price: format_price(p.price),
            stock: if p.in_stock() {
                p.stock.to_string()
            } else {
                "out of stock".to_string()
            },
        })
        .collect()
}

fn build_category_rows(categories: &[Category]) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone().unwrap_or_default(),
            active: if c.active() { "yes" } else { "no" }.to_string(),
        })
        .collect()
}

// -- Dispatch --

pub fn print_products(products: &[Product], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(build_product_rows(products)),
        OutputFormat::Markdown => print_markdown(build_product_rows(products)),
        OutputFormat::Csv => print_csv(build_product_rows(products))?,
        OutputFormat::Json => print_json(&products),
        OutputFormat::Xml => println!("{}", xml_output::products_to_xml(products)?),
    }
    Ok(())
}

pub fn print_categories(categories: &[Category], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(build_category_rows(categories)),
        OutputFormat::Markdown => print_markdown(build_category_rows(categories)),
        OutputFormat::Csv => print_csv(build_category_rows(categories))?,
        OutputFormat::Json => print_json(&categories),
        OutputFormat::Xml => println!("{}", xml_output::categories_to_xml(categories)?),
    }
    Ok(())
}

/// Full detail for a single product.
pub fn print_product_detail(product: &Product, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Markdown => {
            print_products(std::slice::from_ref(product), format)?;
            if !product.description.is_empty() {
                println!("\n{}", product.description);
            }
            if let Some(url) = &product.image_url {
                println!("Image: {}", url);
            }
        }
        OutputFormat::Json => print_json(product),
        _ => print_products(std::slice::from_ref(product), format)?,
    }
    Ok(())
}

// -- Table output --

fn print_table<R: Tabled>(rows: Vec<R>) {
    println!("{}", Table::new(rows));
}

// -- Markdown output --

fn print_markdown<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

fn print_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
