use std::io::Cursor;

use anyhow::Result;
use bakery_lib::types::{Category, Product};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Public storefront pages listed in the sitemap.
pub const SITEMAP_PATHS: [&str; 3] = ["/", "/products", "/categories"];

/// Recursively write a serde_json::Value as XML elements.
fn write_value<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &serde_json::Value,
) -> Result<(), quick_xml::Error> {
    match value {
        serde_json::Value::Null => {
            // Omit null fields entirely
        }
        serde_json::Value::Bool(b) => {
            write_text_element(writer, tag, if *b { "true" } else { "false" })?;
        }
        serde_json::Value::Number(n) => {
            write_text_element(writer, tag, &n.to_string())?;
        }
        serde_json::Value::String(s) => {
            write_text_element(writer, tag, s)?;
        }
        serde_json::Value::Array(arr) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for item in arr {
                write_value(writer, "item", item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        serde_json::Value::Object(map) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (key, val) in map {
                write_value(writer, key, val)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
    }
    Ok(())
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn new_document() -> Result<Writer<Cursor<Vec<u8>>>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

fn finish(writer: Writer<Cursor<Vec<u8>>>) -> Result<String> {
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

/// Serialize a slice of Serialize items into an XML string.
fn items_to_xml<T: Serialize>(root_tag: &str, item_tag: &str, items: &[T]) -> Result<String> {
    let mut writer = new_document()?;

    if items.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(root_tag)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(root_tag)))?;
        for item in items {
            let val = serde_json::to_value(item)?;
            write_value(&mut writer, item_tag, &val)?;
        }
        writer.write_event(Event::End(BytesEnd::new(root_tag)))?;
    }

    finish(writer)
}

pub fn products_to_xml(products: &[Product]) -> Result<String> {
    items_to_xml("products", "product", products)
}

pub fn categories_to_xml(categories: &[Category]) -> Result<String> {
    items_to_xml("categories", "category", categories)
}

/// Builds a sitemaps.org `urlset` with one `<loc>` per path under `base_url`.
pub fn sitemap_xml(base_url: &str, paths: &[&str]) -> Result<String> {
    let base = base_url.trim_end_matches('/');
    let mut writer = new_document()?;

    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;
    for path in paths {
        let loc = format!("{}/{}", base, path.trim_start_matches('/'));
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &loc)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_products_fixture() -> Vec<Product> {
        let json_str = include_str!("../../bakery_api/tests/fixtures/products_paginated.json");
        let resp: serde_json::Value = serde_json::from_str(json_str).unwrap();
        serde_json::from_value(resp["data"]["data"].clone()).unwrap()
    }

    fn load_categories_fixture() -> Vec<Category> {
        let json_str = include_str!("../../bakery_api/tests/fixtures/categories.json");
        let resp: serde_json::Value = serde_json::from_str(json_str).unwrap();
        serde_json::from_value(resp["data"].clone()).unwrap()
    }

    #[test]
    fn test_product_xml_wellformed() {
        let xml = products_to_xml(&load_products_fixture()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<products>"));
        assert!(xml.contains("</products>"));
        assert!(xml.contains("<product>"));
        assert!(xml.contains("<name>Torta de chocolate</name>"));
        assert!(xml.contains("<price>25.5</price>"));
    }

    #[test]
    fn test_nested_category_is_written_as_element() {
        let xml = products_to_xml(&load_products_fixture()).unwrap();
        assert!(xml.contains("<category>"));
        assert!(xml.contains("<name>Tortas</name>"));
    }

    #[test]
    fn test_category_xml_output() {
        let xml = categories_to_xml(&load_categories_fixture()).unwrap();
        assert!(xml.contains("<categories>"));
        assert!(xml.contains("<category>"));
        assert!(xml.contains("<name>Galletas</name>"));
        assert!(xml.contains("<is_active>true</is_active>"));
    }

    #[test]
    fn test_null_fields_omitted() {
        let products = load_products_fixture();
        let xml = products_to_xml(&products[1..]).unwrap();
        assert!(!xml.contains("<image_url>"));
        assert!(!xml.contains("<category_id>"));
    }

    #[test]
    fn test_empty_array_produces_self_closing_root() {
        let xml = products_to_xml(&[]).unwrap();
        assert!(xml.contains("<products/>"));
        assert!(!xml.contains("</products>"));
    }

    #[test]
    fn test_xml_special_chars_escaped() {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        write_value(
            &mut writer,
            "test",
            &serde_json::Value::String("Pan & <Dulce>".to_string()),
        )
        .unwrap();
        let xml = String::from_utf8(writer.into_inner().into_inner()).unwrap();
        assert_eq!(xml, "<test>Pan &amp; &lt;Dulce&gt;</test>");
    }

    #[test]
    fn test_sitemap_lists_storefront_pages() {
        let xml = sitemap_xml("https://shop.example.com/", &SITEMAP_PATHS).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://shop.example.com/</loc>"));
        assert!(xml.contains("<loc>https://shop.example.com/products</loc>"));
        assert!(xml.contains("<loc>https://shop.example.com/categories</loc>"));
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn test_sitemap_base_without_trailing_slash() {
        let xml = sitemap_xml("https://shop.example.com", &["/products"]).unwrap();
        assert!(xml.contains("<loc>https://shop.example.com/products</loc>"));
    }
}
