mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_item_template() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/items")
        .json(&json!({
            "name": "Rain jacket",
            "category": "CLOTHING"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Rain jacket");
    assert_eq!(body["category"].as_str().unwrap(), "CLOTHING");
    assert!(body["id"].as_str().is_some());
}

#[tokio::test]
async fn test_create_item_template_blank_name() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/items")
        .json(&json!({
            "name": "   ",
            "category": "OTHER"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_item_template_padded_name_at_limit() {
    let app = TestApp::new().await;
    let name = "n".repeat(100);

    let response = app
        .server
        .post("/api/items")
        .json(&json!({
            "name": format!("   {}   ", name),
            "category": "OTHER"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), name);
}

#[tokio::test]
async fn test_create_item_template_unknown_category() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/items")
        .json(&json!({
            "name": "Snorkel",
            "category": "DIVING"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_item_template_duplicate_name() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_named_item("Passport").await;

    let response = app
        .server
        .post("/api/items")
        .json(&json!({
            "name": "Passport",
            "category": "DOCUMENTS"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "Conflict");
}

#[tokio::test]
async fn test_list_item_templates_sorted_by_name() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_named_item("Toothbrush").await;
    factory.create_named_item("Charger").await;
    factory.create_named_item("Passport").await;

    let response = app.server.get("/api/items").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Charger", "Passport", "Toothbrush"]);
    assert_eq!(body["total"].as_u64().unwrap(), 3);
    assert_eq!(body["limit"].as_u64().unwrap(), 20);
    assert_eq!(body["offset"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn test_list_item_templates_pagination() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    for _ in 0..5 {
        factory.create_item().await;
    }

    let response = app
        .server
        .get("/api/items")
        .add_query_param("limit", 2)
        .add_query_param("offset", 4)
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"].as_u64().unwrap(), 5);
    assert_eq!(body["limit"].as_u64().unwrap(), 2);
}

#[tokio::test]
async fn test_get_item_template_not_found() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get(&format!("/api/items/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_item_template() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let item = factory.create_named_item("Cable").await;

    let response = app
        .server
        .put(&format!("/api/items/{}", item.id))
        .json(&json!({
            "name": "USB-C cable",
            "category": "ELECTRONICS"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "USB-C cable");
    assert_eq!(body["category"].as_str().unwrap(), "ELECTRONICS");
}

#[tokio::test]
async fn test_update_item_template_name_taken() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_named_item("Sunscreen").await;
    let item = factory.create_named_item("Lotion").await;

    let response = app
        .server
        .put(&format!("/api/items/{}", item.id))
        .json(&json!({ "name": "Sunscreen" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_item_template() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let item = factory.create_item().await;

    let response = app
        .server
        .delete(&format!("/api/items/{}", item.id))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    let response = app
        .server
        .get(&format!("/api/items/{}", item.id))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_item_template_in_use() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let item = factory.create_item().await;
    let trip = factory.create_trip().await;
    factory.create_entry(trip.id, item.id, None, 1).await;

    let response = app
        .server
        .delete(&format!("/api/items/{}", item.id))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    // Still there
    let response = app
        .server
        .get(&format!("/api/items/{}", item.id))
        .await;

    response.assert_status(StatusCode::OK);
}
