mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_bag_template() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/bags")
        .json(&json!({
            "name": "Blue suitcase",
            "type": "CHECKED_LARGE"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Blue suitcase");
    assert_eq!(body["type"].as_str().unwrap(), "CHECKED_LARGE");
}

#[tokio::test]
async fn test_create_bag_template_duplicate_name() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_named_bag("Daypack").await;

    let response = app
        .server
        .post("/api/bags")
        .json(&json!({
            "name": "Daypack",
            "type": "BACKPACK"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_bag_templates() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_bag().await;
    factory.create_bag().await;

    let response = app.server.get("/api/bags").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"].as_u64().unwrap(), 2);
}

#[tokio::test]
async fn test_update_bag_template_type() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let bag = factory.create_named_bag("Duffel").await;

    let response = app
        .server
        .put(&format!("/api/bags/{}", bag.id))
        .json(&json!({ "type": "CHECKED_MEDIUM" }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Duffel");
    assert_eq!(body["type"].as_str().unwrap(), "CHECKED_MEDIUM");
}

#[tokio::test]
async fn test_delete_bag_template_not_found() {
    let app = TestApp::new().await;

    let response = app
        .server
        .delete(&format!("/api/bags/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_bag_template_in_use() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let bag = factory.create_bag().await;
    factory.create_trip_with_bag(bag.id).await;

    let response = app
        .server
        .delete(&format!("/api/bags/{}", bag.id))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_bag_template_after_detach() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let bag = factory.create_bag().await;
    let trip = factory.create_trip_with_bag(bag.id).await;

    app.server
        .delete(&format!("/api/trips/{}/bags/{}", trip.id, bag.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = app
        .server
        .delete(&format!("/api/bags/{}", bag.id))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
}
