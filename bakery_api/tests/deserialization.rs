use bakery_api::types::{Category, ListEnvelope, Page, Product};
use serde_json::Value;

fn load_fixture(name: &str) -> Value {
    let text = std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn products_page() -> Page<Product> {
    let value = bakery_api::types::strip_envelope(load_fixture("products_paginated.json"));
    ListEnvelope::classify(value).into_page().unwrap()
}

#[test]
fn deserialize_products_full() {
    let page = products_page();
    assert_eq!(page.items.len(), 2);

    let torta = &page.items[0];
    assert_eq!(torta.id, 1);
    assert_eq!(torta.price, 25.5);
    assert_eq!(torta.stock, 4);
    assert_eq!(torta.category_id, Some(2));
    assert_eq!(torta.category.as_ref().unwrap().name, "Tortas");
    assert_eq!(
        torta.created_at.unwrap().to_rfc3339(),
        "2024-05-01T10:00:00+00:00"
    );
    assert!(torta.in_stock());
}

#[test]
fn deserialize_products_nullable_fields() {
    let page = products_page();
    let alfajor = &page.items[1];
    assert_eq!(alfajor.price, 1.75);
    assert!(alfajor.image_url.is_none());
    assert!(alfajor.category_id.is_none());
    assert!(alfajor.category.is_none());
    assert!(alfajor.category_label().is_none());
    assert!(!alfajor.in_stock());
}

#[test]
fn deserialize_paginated_meta() {
    let page = products_page();
    assert_eq!(page.paging.page, 1);
    assert_eq!(page.paging.size, Some(12));
    assert_eq!(page.paging.total_items, 14);
    assert_eq!(page.paging.total_pages, 2);
}

#[test]
fn deserialize_categories() {
    let value = bakery_api::types::strip_envelope(load_fixture("categories.json"));
    let categories: Vec<Category> = serde_json::from_value(value).unwrap();
    assert_eq!(categories.len(), 2);
    assert!(categories[0].description.is_none());
    assert_eq!(categories[0].is_active, Some(true));
    assert!(categories[1].is_active.is_none());
    assert!(categories[1].created_at.is_none());
}

#[test]
fn deserialize_missing_required_fields_returns_error() {
    let json = r#"[{"id": 1, "price": 2}]"#;
    let result = serde_json::from_str::<Vec<Product>>(json);
    assert!(result.is_err());
}

#[test]
fn deserialize_products_with_loose_fields() {
    let value = bakery_api::types::strip_envelope(load_fixture("products_loose.json"));
    let page: Page<Product> = ListEnvelope::classify(value).into_page().unwrap();
    assert_eq!(page.items.len(), 2);

    let medialuna = &page.items[1];
    assert_eq!(medialuna.description, "");
    assert_eq!(medialuna.stock, 0);
    assert_eq!(
        medialuna.created_at.unwrap().to_rfc3339(),
        "2024-05-01T10:00:00+00:00"
    );
    assert!(medialuna.updated_at.is_none());
}
