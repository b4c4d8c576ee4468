use anyhow::Context;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use trip_packer::config::Config;
use trip_packer::handlers::{
    AddEntryRequest, BagGroupResponse, BagTemplateListResponse, BagTemplateResponse,
    CreateBagTemplateRequest, CreateItemTemplateRequest, CreateTripRequest, HealthResponse,
    ItemTemplateListResponse, ItemTemplateResponse, MoveEntryRequest, PackingEntryResponse,
    PackingLineResponse, PackingListResponse, TripBagResponse, TripDetailResponse,
    TripListResponse, TripResponse, UpdateBagTemplateRequest, UpdateEntryRequest,
    UpdateItemTemplateRequest, UpdateTripRequest,
};
use trip_packer::models::{BagType, ItemCategory, Overview, PackingStatus};
use trip_packer::state::AppState;
use trip_packer::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::item_template::create_item_template,
        handlers::item_template::list_item_templates,
        handlers::item_template::get_item_template,
        handlers::item_template::update_item_template,
        handlers::item_template::delete_item_template,
        handlers::bag_template::create_bag_template,
        handlers::bag_template::list_bag_templates,
        handlers::bag_template::get_bag_template,
        handlers::bag_template::update_bag_template,
        handlers::bag_template::delete_bag_template,
        handlers::trip::create_trip,
        handlers::trip::list_trips,
        handlers::trip::get_trip,
        handlers::trip::get_trip_detail,
        handlers::trip::update_trip,
        handlers::trip::delete_trip,
        handlers::trip::list_trip_bags,
        handlers::trip::attach_bag,
        handlers::trip::detach_bag,
        handlers::packing::list_entries,
        handlers::packing::add_entry,
        handlers::packing::get_overview,
        handlers::packing::list_groups,
        handlers::packing::get_entry,
        handlers::packing::update_entry,
        handlers::packing::move_entry,
        handlers::packing::delete_entry,
    ),
    components(schemas(
        HealthResponse,
        ItemCategory,
        BagType,
        PackingStatus,
        Overview,
        CreateItemTemplateRequest,
        UpdateItemTemplateRequest,
        ItemTemplateResponse,
        ItemTemplateListResponse,
        CreateBagTemplateRequest,
        UpdateBagTemplateRequest,
        BagTemplateResponse,
        BagTemplateListResponse,
        CreateTripRequest,
        UpdateTripRequest,
        TripResponse,
        TripListResponse,
        TripBagResponse,
        TripDetailResponse,
        AddEntryRequest,
        UpdateEntryRequest,
        MoveEntryRequest,
        PackingEntryResponse,
        PackingLineResponse,
        PackingListResponse,
        BagGroupResponse,
    )),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Items", description = "Item template management endpoints"),
        (name = "Bags", description = "Bag template management endpoints"),
        (name = "Trips", description = "Trip management endpoints"),
        (name = "Packing", description = "Packing list endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.server_addr();

    tracing::info!(backend = ?config.storage_backend, "Opening storage");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Storage ready");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
