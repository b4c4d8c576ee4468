// Library crate for the trip packer
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    add_entry, attach_bag, create_bag_template, create_item_template, create_trip,
    delete_bag_template, delete_entry, delete_item_template, delete_trip, detach_bag,
    get_bag_template, get_entry, get_item_template, get_overview, get_trip, get_trip_detail,
    health, list_bag_templates, list_entries, list_groups, list_item_templates, list_trip_bags,
    list_trips, move_entry, update_bag_template, update_entry, update_item_template, update_trip,
};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    Router::new()
        .route("/health", get(health))
        // Item template routes
        .route(
            "/api/items",
            get(list_item_templates).post(create_item_template),
        )
        .route(
            "/api/items/{id}",
            get(get_item_template)
                .put(update_item_template)
                .delete(delete_item_template),
        )
        // Bag template routes
        .route("/api/bags", get(list_bag_templates).post(create_bag_template))
        .route(
            "/api/bags/{id}",
            get(get_bag_template)
                .put(update_bag_template)
                .delete(delete_bag_template),
        )
        // Trip routes
        .route("/api/trips", get(list_trips).post(create_trip))
        .route(
            "/api/trips/{id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .route("/api/trips/{id}/detail", get(get_trip_detail))
        .route("/api/trips/{id}/bags", get(list_trip_bags))
        .route(
            "/api/trips/{id}/bags/{bag_id}",
            post(attach_bag).delete(detach_bag),
        )
        // Packing routes (nested under trips)
        .route("/api/trips/{id}/entries", get(list_entries).post(add_entry))
        .route("/api/trips/{id}/overview", get(get_overview))
        .route("/api/trips/{id}/groups", get(list_groups))
        // Packing routes (direct access)
        .route(
            "/api/entries/{id}",
            get(get_entry).patch(update_entry).delete(delete_entry),
        )
        .route("/api/entries/{id}/bag", put(move_entry))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Allow the configured origin, or any origin when none is set
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match origin {
        Some("*") | None => layer.allow_origin(Any),
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS_ORIGIN");
                layer.allow_origin(Any)
            }
        },
    }
}
