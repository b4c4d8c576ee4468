use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::{BagTemplateResponse, ItemTemplateResponse};
use crate::models::{
    BagGroup, CreatePackingEntry, Overview, PackingEntry, PackingEntryPatch, PackingStatus,
};
use crate::services::PackingLine;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddEntryRequest {
    pub item_id: Uuid,
    pub bag_id: Option<Uuid>,
    /// Defaults to 1
    pub quantity: Option<i32>,
    /// Defaults to UNPACKED
    pub status: Option<PackingStatus>,
}

/// Partial update of an entry. An explicit `"bag_id": null` unassigns it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEntryRequest {
    pub quantity: Option<i32>,
    pub status: Option<PackingStatus>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub bag_id: Option<Option<Uuid>>,
}

/// `bag_id` must be present: a bag ID, or null to unassign
#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveEntryRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<Uuid>, required = true)]
    pub bag_id: Option<Option<Uuid>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackingEntryResponse {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub item_id: Uuid,
    pub bag_id: Option<Uuid>,
    pub quantity: i32,
    pub status: PackingStatus,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: time::OffsetDateTime,
}

impl From<PackingEntry> for PackingEntryResponse {
    fn from(e: PackingEntry) -> Self {
        Self {
            id: e.id,
            trip_id: e.trip_id,
            item_id: e.item_id,
            bag_id: e.bag_id,
            quantity: e.quantity,
            status: e.status,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Entry with its item and bag resolved
#[derive(Debug, Serialize, ToSchema)]
pub struct PackingLineResponse {
    #[serde(flatten)]
    pub entry: PackingEntryResponse,
    pub item: ItemTemplateResponse,
    pub bag: Option<BagTemplateResponse>,
}

impl From<PackingLine> for PackingLineResponse {
    fn from(line: PackingLine) -> Self {
        Self {
            entry: line.entry.into(),
            item: line.item.into(),
            bag: line.bag.map(|b| b.into()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackingListResponse {
    pub data: Vec<PackingLineResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BagGroupResponse {
    /// Null for the unassigned group
    pub bag_id: Option<Uuid>,
    pub bag_name: String,
    pub entries: Vec<PackingEntryResponse>,
}

impl From<BagGroup> for BagGroupResponse {
    fn from(g: BagGroup) -> Self {
        Self {
            bag_id: g.bag_id,
            bag_name: g.bag_name,
            entries: g.entries.into_iter().map(|e| e.into()).collect(),
        }
    }
}

// ============ Handlers ============

/// List the packing entries of a trip in creation order
#[utoipa::path(
    get,
    path = "/api/trips/{id}/entries",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Packing list", body = PackingListResponse),
        (status = 404, description = "Trip not found")
    ),
    tag = "Packing"
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<PackingListResponse>> {
    let lines = state.packing.packing_list(trip_id).await?;

    Ok(Json(PackingListResponse {
        total: lines.len(),
        data: lines.into_iter().map(|l| l.into()).collect(),
    }))
}

/// Add an item to a trip. Adding the same item to the same bag again
/// increases the quantity of the existing entry.
#[utoipa::path(
    post,
    path = "/api/trips/{id}/entries",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    request_body = AddEntryRequest,
    responses(
        (status = 201, description = "Entry created or merged", body = PackingEntryResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "Packing"
)]
pub async fn add_entry(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<AddEntryRequest>,
) -> AppResult<(StatusCode, Json<PackingEntryResponse>)> {
    let input = CreatePackingEntry {
        trip_id,
        item_id: payload.item_id,
        bag_id: payload.bag_id,
        quantity: payload.quantity.unwrap_or(1),
        status: payload.status.unwrap_or_default(),
    };

    let entry = state.packing.add_entry(input).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Count a trip's entries by status
#[utoipa::path(
    get,
    path = "/api/trips/{id}/overview",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Status counts", body = Overview),
        (status = 404, description = "Trip not found")
    ),
    tag = "Packing"
)]
pub async fn get_overview(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<Overview>> {
    let overview = state.packing.get_overview(trip_id).await?;
    Ok(Json(overview))
}

/// Entries of a trip grouped by bag, unassigned entries last
#[utoipa::path(
    get,
    path = "/api/trips/{id}/groups",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Entries grouped by bag", body = Vec<BagGroupResponse>),
        (status = 404, description = "Trip not found")
    ),
    tag = "Packing"
)]
pub async fn list_groups(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<Vec<BagGroupResponse>>> {
    let groups = state.packing.grouped_entries(trip_id).await?;
    Ok(Json(groups.into_iter().map(|g| g.into()).collect()))
}

/// Get a packing entry by ID
#[utoipa::path(
    get,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry details", body = PackingEntryResponse),
        (status = 404, description = "Entry not found")
    ),
    tag = "Packing"
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PackingEntryResponse>> {
    let entry = state.packing.get_entry(id).await?;
    Ok(Json(entry.into()))
}

/// Update quantity, status or bag of an entry
#[utoipa::path(
    patch,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Entry ID")
    ),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = PackingEntryResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Item already has an entry in that bag")
    ),
    tag = "Packing"
)]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEntryRequest>,
) -> AppResult<Json<PackingEntryResponse>> {
    let patch = PackingEntryPatch {
        quantity: payload.quantity,
        status: payload.status,
        bag_id: payload.bag_id,
    };

    let entry = state.packing.update_entry(id, &patch).await?;
    Ok(Json(entry.into()))
}

/// Move an entry to another bag of its trip, or unassign it
#[utoipa::path(
    put,
    path = "/api/entries/{id}/bag",
    params(
        ("id" = Uuid, Path, description = "Entry ID")
    ),
    request_body = MoveEntryRequest,
    responses(
        (status = 200, description = "Entry moved", body = PackingEntryResponse),
        (status = 400, description = "Missing bag_id or bag is not on the trip"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Item already has an entry in that bag")
    ),
    tag = "Packing"
)]
pub async fn move_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MoveEntryRequest>,
) -> AppResult<Json<PackingEntryResponse>> {
    let bag_id = payload
        .bag_id
        .ok_or_else(|| AppError::validation("bag_id is required, use null to unassign"))?;

    let entry = state.packing.move_entry(id, bag_id).await?;
    Ok(Json(entry.into()))
}

/// Remove an entry from its trip
#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(
        ("id" = Uuid, Path, description = "Entry ID")
    ),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 404, description = "Entry not found")
    ),
    tag = "Packing"
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.packing.remove_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
