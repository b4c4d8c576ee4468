use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::{
    validate_optional, validate_required, BagGroupResponse, BagTemplateResponse,
    PaginationParams,
};
use crate::models::{CreateTrip, Overview, Trip, TripBag, UpdateTrip};
use crate::services::TripDetail;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTripRequest {
    pub name: String,
    #[schema(value_type = String, format = Date, example = "2026-07-01")]
    pub start_date: Date,
    #[schema(value_type = String, format = Date, example = "2026-07-14")]
    pub end_date: Date,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTripRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<Date>,
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Date>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, format = Date)]
    pub start_date: Date,
    #[schema(value_type = String, format = Date)]
    pub end_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Trip> for TripResponse {
    fn from(t: Trip) -> Self {
        Self {
            id: t.id,
            name: t.name,
            start_date: t.start_date,
            end_date: t.end_date,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripListResponse {
    pub data: Vec<TripResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripBagResponse {
    pub trip_id: Uuid,
    pub bag_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: time::OffsetDateTime,
}

impl From<TripBag> for TripBagResponse {
    fn from(tb: TripBag) -> Self {
        Self {
            trip_id: tb.trip_id,
            bag_id: tb.bag_id,
            created_at: tb.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripDetailResponse {
    #[serde(flatten)]
    pub trip: TripResponse,
    pub bags: Vec<BagTemplateResponse>,
    pub overview: Overview,
    pub groups: Vec<BagGroupResponse>,
}

impl From<TripDetail> for TripDetailResponse {
    fn from(d: TripDetail) -> Self {
        Self {
            trip: d.trip.into(),
            bags: d.bags.into_iter().map(|b| b.into()).collect(),
            overview: d.overview,
            groups: d.groups.into_iter().map(|g| g.into()).collect(),
        }
    }
}

// ============ Handlers ============

/// Create a new trip
#[utoipa::path(
    post,
    path = "/api/trips",
    request_body = CreateTripRequest,
    responses(
        (status = 201, description = "Trip created", body = TripResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already taken")
    ),
    tag = "Trips"
)]
pub async fn create_trip(
    State(state): State<AppState>,
    Json(payload): Json<CreateTripRequest>,
) -> AppResult<(StatusCode, Json<TripResponse>)> {
    validate_required(&payload.name, "Name", 100)?;

    let input = CreateTrip {
        name: payload.name.trim().to_string(),
        start_date: payload.start_date,
        end_date: payload.end_date,
    };

    let trip = state.trips.create_trip(&input).await?;
    Ok((StatusCode::CREATED, Json(trip.into())))
}

/// List trips by start date
#[utoipa::path(
    get,
    path = "/api/trips",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of trips", body = TripListResponse)
    ),
    tag = "Trips"
)]
pub async fn list_trips(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<TripListResponse>> {
    let (limit, offset) = params.resolve();

    let (trips, total) = state.trips.list_trips(limit, offset).await?;

    Ok(Json(TripListResponse {
        data: trips.into_iter().map(|t| t.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a trip by ID
#[utoipa::path(
    get,
    path = "/api/trips/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip details", body = TripResponse),
        (status = 404, description = "Trip not found")
    ),
    tag = "Trips"
)]
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TripResponse>> {
    let trip = state.trips.get_trip(id).await?;
    Ok(Json(trip.into()))
}

/// Trip with its bags, status counts and grouped entries
#[utoipa::path(
    get,
    path = "/api/trips/{id}/detail",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip with packing state", body = TripDetailResponse),
        (status = 404, description = "Trip not found")
    ),
    tag = "Trips"
)]
pub async fn get_trip_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TripDetailResponse>> {
    let detail = state.trips.detail(id).await?;
    Ok(Json(detail.into()))
}

/// Update a trip
#[utoipa::path(
    put,
    path = "/api/trips/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    request_body = UpdateTripRequest,
    responses(
        (status = 200, description = "Trip updated", body = TripResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Trip not found"),
        (status = 409, description = "Name already taken")
    ),
    tag = "Trips"
)]
pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTripRequest>,
) -> AppResult<Json<TripResponse>> {
    validate_optional(&payload.name, "Name", 100)?;

    let input = UpdateTrip {
        name: payload.name.map(|n| n.trim().to_string()),
        start_date: payload.start_date,
        end_date: payload.end_date,
    };

    let trip = state.trips.update_trip(id, &input).await?;
    Ok(Json(trip.into()))
}

/// Delete a trip together with its bag associations and entries
#[utoipa::path(
    delete,
    path = "/api/trips/{id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 204, description = "Trip deleted"),
        (status = 404, description = "Trip not found")
    ),
    tag = "Trips"
)]
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.trips.delete_trip(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Bags of a trip in the order they were added
#[utoipa::path(
    get,
    path = "/api/trips/{id}/bags",
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Bags of the trip", body = Vec<BagTemplateResponse>),
        (status = 404, description = "Trip not found")
    ),
    tag = "Trips"
)]
pub async fn list_trip_bags(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<BagTemplateResponse>>> {
    let bags = state.trips.list_bags(id).await?;
    Ok(Json(bags.into_iter().map(|b| b.into()).collect()))
}

/// Take a bag template along on a trip
#[utoipa::path(
    post,
    path = "/api/trips/{id}/bags/{bag_id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID"),
        ("bag_id" = Uuid, Path, description = "Bag template ID")
    ),
    responses(
        (status = 201, description = "Bag attached", body = TripBagResponse),
        (status = 404, description = "Trip or bag template not found"),
        (status = 409, description = "Bag already on the trip")
    ),
    tag = "Trips"
)]
pub async fn attach_bag(
    State(state): State<AppState>,
    Path((id, bag_id)): Path<(Uuid, Uuid)>,
) -> AppResult<(StatusCode, Json<TripBagResponse>)> {
    let trip_bag = state.trips.attach_bag(id, bag_id).await?;
    Ok((StatusCode::CREATED, Json(trip_bag.into())))
}

/// Remove a bag from a trip; its entries become unassigned
#[utoipa::path(
    delete,
    path = "/api/trips/{id}/bags/{bag_id}",
    params(
        ("id" = Uuid, Path, description = "Trip ID"),
        ("bag_id" = Uuid, Path, description = "Bag template ID")
    ),
    responses(
        (status = 204, description = "Bag detached"),
        (status = 404, description = "Trip not found or bag not on the trip")
    ),
    tag = "Trips"
)]
pub async fn detach_bag(
    State(state): State<AppState>,
    Path((id, bag_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state.trips.detach_bag(id, bag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
