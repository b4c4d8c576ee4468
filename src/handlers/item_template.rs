use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::{validate_optional, validate_required, PaginationParams};
use crate::models::{CreateItemTemplate, ItemCategory, ItemTemplate, UpdateItemTemplate};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemTemplateRequest {
    pub name: String,
    pub category: ItemCategory,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemTemplateRequest {
    pub name: Option<String>,
    pub category: Option<ItemCategory>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemTemplateResponse {
    pub id: Uuid,
    pub name: String,
    pub category: ItemCategory,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: time::OffsetDateTime,
}

impl From<ItemTemplate> for ItemTemplateResponse {
    fn from(t: ItemTemplate) -> Self {
        Self {
            id: t.id,
            name: t.name,
            category: t.category,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemTemplateListResponse {
    pub data: Vec<ItemTemplateResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

// ============ Handlers ============

/// Create a new item template
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateItemTemplateRequest,
    responses(
        (status = 201, description = "Item template created", body = ItemTemplateResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already taken")
    ),
    tag = "Items"
)]
pub async fn create_item_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemTemplateRequest>,
) -> AppResult<(StatusCode, Json<ItemTemplateResponse>)> {
    validate_required(&payload.name, "Name", 100)?;

    let input = CreateItemTemplate {
        name: payload.name.trim().to_string(),
        category: payload.category,
    };

    let template = state.templates.create_item_template(&input).await?;
    Ok((StatusCode::CREATED, Json(template.into())))
}

/// List item templates, ordered by name
#[utoipa::path(
    get,
    path = "/api/items",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of item templates", body = ItemTemplateListResponse)
    ),
    tag = "Items"
)]
pub async fn list_item_templates(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ItemTemplateListResponse>> {
    let (limit, offset) = params.resolve();

    let (templates, total) = state.templates.list_item_templates(limit, offset).await?;

    Ok(Json(ItemTemplateListResponse {
        data: templates.into_iter().map(|t| t.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get an item template by ID
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item template ID")
    ),
    responses(
        (status = 200, description = "Item template details", body = ItemTemplateResponse),
        (status = 404, description = "Item template not found")
    ),
    tag = "Items"
)]
pub async fn get_item_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ItemTemplateResponse>> {
    let template = state.templates.get_item_template(id).await?;
    Ok(Json(template.into()))
}

/// Update an item template
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item template ID")
    ),
    request_body = UpdateItemTemplateRequest,
    responses(
        (status = 200, description = "Item template updated", body = ItemTemplateResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Item template not found"),
        (status = 409, description = "Name already taken")
    ),
    tag = "Items"
)]
pub async fn update_item_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemTemplateRequest>,
) -> AppResult<Json<ItemTemplateResponse>> {
    validate_optional(&payload.name, "Name", 100)?;

    let input = UpdateItemTemplate {
        name: payload.name.map(|n| n.trim().to_string()),
        category: payload.category,
    };

    let template = state.templates.update_item_template(id, &input).await?;
    Ok(Json(template.into()))
}

/// Delete an item template that no packing entry uses
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item template ID")
    ),
    responses(
        (status = 204, description = "Item template deleted"),
        (status = 404, description = "Item template not found"),
        (status = 409, description = "Item template is in use")
    ),
    tag = "Items"
)]
pub async fn delete_item_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.templates.delete_item_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
