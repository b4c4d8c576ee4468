mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"].as_str().unwrap(), "ok");
}

#[tokio::test]
async fn test_create_trip() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/trips")
        .json(&json!({
            "name": "Lisbon",
            "start_date": "2026-07-01",
            "end_date": "2026-07-14"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Lisbon");
    assert_eq!(body["start_date"].as_str().unwrap(), "2026-07-01");
    assert_eq!(body["end_date"].as_str().unwrap(), "2026-07-14");
}

#[tokio::test]
async fn test_create_trip_single_day() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/trips")
        .json(&json!({
            "name": "Day hike",
            "start_date": "2026-05-02",
            "end_date": "2026-05-02"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_trip_end_before_start() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/trips")
        .json(&json!({
            "name": "Backwards",
            "start_date": "2026-07-14",
            "end_date": "2026-07-01"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_trip_dates_checked_against_stored_trip() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    // Runs 2026-07-01 to 2026-07-08
    let trip = factory.create_trip().await;

    let response = app
        .server
        .put(&format!("/api/trips/{}", trip.id))
        .json(&json!({ "start_date": "2026-07-10" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let response = app
        .server
        .put(&format!("/api/trips/{}", trip.id))
        .json(&json!({ "end_date": "2026-07-20", "name": "Longer trip" }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Longer trip");
    assert_eq!(body["end_date"].as_str().unwrap(), "2026-07-20");
}

#[tokio::test]
async fn test_list_trips() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    factory.create_trip().await;
    factory.create_trip().await;

    let response = app.server.get("/api/trips").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"].as_u64().unwrap(), 2);
}

#[tokio::test]
async fn test_attach_and_list_bags_in_order() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let trip = factory.create_trip().await;
    let second = factory.create_named_bag("Z suitcase").await;
    let first = factory.create_named_bag("A backpack").await;

    for bag in [&second, &first] {
        app.server
            .post(&format!("/api/trips/{}/bags/{}", trip.id, bag.id))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = app
        .server
        .get(&format!("/api/trips/{}/bags", trip.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let ids: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![second.id.to_string(), first.id.to_string()]);
}

#[tokio::test]
async fn test_attach_bag_twice() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let bag = factory.create_bag().await;
    let trip = factory.create_trip_with_bag(bag.id).await;

    let response = app
        .server
        .post(&format!("/api/trips/{}/bags/{}", trip.id, bag.id))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_attach_unknown_bag() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let trip = factory.create_trip().await;

    let response = app
        .server
        .post(&format!("/api/trips/{}/bags/{}", trip.id, Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detach_bag_not_on_trip() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let trip = factory.create_trip().await;
    let bag = factory.create_bag().await;

    let response = app
        .server
        .delete(&format!("/api/trips/{}/bags/{}", trip.id, bag.id))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detach_bag_unassigns_entries() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let bag = factory.create_bag().await;
    let trip = factory.create_trip_with_bag(bag.id).await;
    let item = factory.create_item().await;
    let entry = factory.create_entry(trip.id, item.id, Some(bag.id), 2).await;

    app.server
        .delete(&format!("/api/trips/{}/bags/{}", trip.id, bag.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = app
        .server
        .get(&format!("/api/entries/{}", entry.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["bag_id"].is_null());
    assert_eq!(body["quantity"].as_i64().unwrap(), 2);
}

#[tokio::test]
async fn test_trip_detail() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let bag = factory.create_named_bag("Carry-on").await;
    let trip = factory.create_trip_with_bag(bag.id).await;
    let socks = factory.create_item().await;
    let passport = factory.create_item().await;
    factory.create_entry(trip.id, socks.id, Some(bag.id), 4).await;
    factory.create_entry(trip.id, passport.id, None, 1).await;

    let response = app
        .server
        .get(&format!("/api/trips/{}/detail", trip.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["id"].as_str().unwrap(), trip.id.to_string());
    assert_eq!(body["bags"].as_array().unwrap().len(), 1);
    assert_eq!(body["overview"]["total"].as_u64().unwrap(), 2);
    assert_eq!(body["overview"]["UNPACKED"].as_u64().unwrap(), 2);

    let groups = body["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["bag_name"].as_str().unwrap(), "Carry-on");
    assert_eq!(groups[1]["bag_name"].as_str().unwrap(), "Unassigned");
    assert!(groups[1]["bag_id"].is_null());
}

#[tokio::test]
async fn test_delete_trip_cascades() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let bag = factory.create_bag().await;
    let trip = factory.create_trip_with_bag(bag.id).await;
    let item = factory.create_item().await;
    let entry = factory.create_entry(trip.id, item.id, Some(bag.id), 1).await;

    app.server
        .delete(&format!("/api/trips/{}", trip.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/trips/{}", trip.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("/api/entries/{}", entry.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("/api/trips/{}/overview", trip.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Templates survive and are free to delete
    app.server
        .delete(&format!("/api/items/{}", item.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .delete(&format!("/api/bags/{}", bag.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}
