use bakery_api::types::{CategoryPayload, ProductPayload};
use bakery_api::{Client, Error, Method, ProductQuery, Query, RequestOptions};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn sample_items() -> Value {
    json!([
        {"id": 1, "name": "Brownie", "price": 3.5},
        {"id": 2, "name": "Scone", "price": 2.0}
    ])
}

async fn serve(body: Value) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn fetch_normalizes_all_envelope_shapes() {
    let shapes = [
        sample_items(),
        json!({"data": sample_items()}),
        json!({"success": true, "data": sample_items()}),
    ];

    let mut normalized = Vec::new();
    for shape in shapes {
        let mock_server = serve(shape).await;
        let client = Client::with_base_url(&mock_server.uri());
        let value = client
            .fetch("/items", RequestOptions::default())
            .await
            .unwrap();
        let page = bakery_api::types::ListEnvelope::classify(value)
            .into_page::<Value>()
            .unwrap();
        normalized.push(page.items);
    }

    assert_eq!(normalized[0], normalized[1]);
    assert_eq!(normalized[1], normalized[2]);
    assert_eq!(Value::Array(normalized[0].clone()), sample_items());
}

#[tokio::test]
async fn fetch_only_strips_success_data_envelope() {
    let mock_server = serve(json!({"data": sample_items()})).await;
    let client = Client::with_base_url(&mock_server.uri());
    let value = client
        .fetch("/items", RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(value, json!({"data": sample_items()}));
}

#[tokio::test]
async fn fetch_non_success_status_carries_status_and_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client
        .fetch("/products/99", RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    let message = err.to_string();
    assert!(message.contains("404"));
    assert!(message.contains("Not found"));
}

#[tokio::test]
async fn fetch_malformed_json_is_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_products(&ProductQuery::default()).await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn fetch_unreachable_server_is_request_failed() {
    let client = Client::with_base_url("http://127.0.0.1:9");
    let result = client.fetch("/products", RequestOptions::default()).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}

#[tokio::test]
async fn fetch_sends_method_headers_and_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/custom"))
        .and(header("x-trace", "abc"))
        .and(body_json(json!({"k": "v"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let options = RequestOptions::json(Method::PATCH, &json!({"k": "v"}))
        .unwrap()
        .with_header("x-trace", "abc");
    let value = client.fetch("/custom", options).await.unwrap();
    assert_eq!(value, json!({"ok": true}));
}

#[tokio::test]
async fn get_products_sends_query_and_reads_pagination() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "12"))
        .and(query_param("category_id", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("products_paginated.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = ProductQuery::default()
        .with_page(1)
        .with_limit(12)
        .with_category_id(2);
    let page = client.get_products(&query).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "Torta de chocolate");
    assert_eq!(page.paging.total_items, 14);
    assert_eq!(page.paging.total_pages, 2);
    assert_eq!(page.paging.page, 1);
    assert_eq!(page.paging.size, Some(12));
}

#[tokio::test]
async fn get_product_accepts_bare_and_wrapped_items() {
    let bare: Value = serde_json::from_str(&load_fixture("product.json")).unwrap();
    for body in [
        bare.clone(),
        json!({"data": bare.clone()}),
        json!({"success": true, "data": bare.clone()}),
    ] {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let client = Client::with_base_url(&mock_server.uri());
        let product = client.get_product(7).await.unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.name, "Cheesecake");
        assert_eq!(product.price, 18.0);
    }
}

#[tokio::test]
async fn create_product_omits_blank_image_url() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"id": 30, "name": "Pie", "price": 9.0, "image_url": "https://img/auto.jpg"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let payload = ProductPayload {
        name: "Pie".to_string(),
        description: "Apple pie".to_string(),
        price: 9.0,
        stock: 5,
        category_id: 2,
        image_url: None,
    };
    let created = client.create_product(&payload).await.unwrap().unwrap();
    assert_eq!(created.id, 30);
    assert_eq!(created.image_url.as_deref(), Some("https://img/auto.jpg"));

    let requests = mock_server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        json!({"name": "Pie", "description": "Apple pie", "price": 9.0, "stock": 5, "category_id": 2})
    );
}

#[tokio::test]
async fn update_product_tolerates_unexpected_echo() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let payload = ProductPayload {
        name: "Pie".to_string(),
        description: "Apple pie".to_string(),
        price: 9.0,
        stock: 5,
        category_id: 2,
        image_url: Some("https://img/pie.jpg".to_string()),
    };
    let updated = client.update_product(5, &payload).await.unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn delete_product_with_empty_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    assert!(client.delete_product(5).await.is_ok());
}

#[tokio::test]
async fn get_categories_unwraps_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categorias"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("categories.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let categories = client.get_categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Galletas");
    assert_eq!(categories[1].description.as_deref(), Some("Tortas enteras"));
    assert!(categories[1].active());
}

#[tokio::test]
async fn category_crud_round() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/categorias"))
        .and(body_json(json!({"name": "Panes", "description": null, "is_active": true})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9, "name": "Panes"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/categorias/9"))
        .and(body_json(json!({"name": "Panes", "description": "Masa madre"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 9, "name": "Panes", "description": "Masa madre"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/categorias/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let created = client
        .create_category(&CategoryPayload {
            name: "Panes".to_string(),
            description: None,
            is_active: Some(true),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.id, 9);

    let updated = client
        .update_category(
            9,
            &CategoryPayload {
                name: "Panes".to_string(),
                description: Some("Masa madre".to_string()),
                is_active: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("Masa madre"));

    client.delete_category(9).await.unwrap();
}
