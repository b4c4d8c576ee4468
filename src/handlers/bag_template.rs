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
use crate::models::{CreateBagTemplate, BagType, BagTemplate, UpdateBagTemplate};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBagTemplateRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub bag_type: BagType,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBagTemplateRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub bag_type: Option<BagType>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BagTemplateResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub bag_type: BagType,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: time::OffsetDateTime,
}

impl From<BagTemplate> for BagTemplateResponse {
    fn from(t: BagTemplate) -> Self {
        Self {
            id: t.id,
            name: t.name,
            bag_type: t.bag_type,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BagTemplateListResponse {
    pub data: Vec<BagTemplateResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

// ============ Handlers ============

/// Create a new bag template
#[utoipa::path(
    post,
    path = "/api/bags",
    request_body = CreateBagTemplateRequest,
    responses(
        (status = 201, description = "Bag template created", body = BagTemplateResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already taken")
    ),
    tag = "Bags"
)]
pub async fn create_bag_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateBagTemplateRequest>,
) -> AppResult<(StatusCode, Json<BagTemplateResponse>)> {
    validate_required(&payload.name, "Name", 100)?;

    let input = CreateBagTemplate {
        name: payload.name.trim().to_string(),
        bag_type: payload.bag_type,
    };

    let template = state.templates.create_bag_template(&input).await?;
    Ok((StatusCode::CREATED, Json(template.into())))
}

/// List bag templates, ordered by name
#[utoipa::path(
    get,
    path = "/api/bags",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of bag templates", body = BagTemplateListResponse)
    ),
    tag = "Bags"
)]
pub async fn list_bag_templates(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<BagTemplateListResponse>> {
    let (limit, offset) = params.resolve();

    let (templates, total) = state.templates.list_bag_templates(limit, offset).await?;

    Ok(Json(BagTemplateListResponse {
        data: templates.into_iter().map(|t| t.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get an bag template by ID
#[utoipa::path(
    get,
    path = "/api/bags/{id}",
    params(
        ("id" = Uuid, Path, description = "Bag template ID")
    ),
    responses(
        (status = 200, description = "Bag template details", body = BagTemplateResponse),
        (status = 404, description = "Bag template not found")
    ),
    tag = "Bags"
)]
pub async fn get_bag_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BagTemplateResponse>> {
    let template = state.templates.get_bag_template(id).await?;
    Ok(Json(template.into()))
}

/// Update an bag template
#[utoipa::path(
    put,
    path = "/api/bags/{id}",
    params(
        ("id" = Uuid, Path, description = "Bag template ID")
    ),
    request_body = UpdateBagTemplateRequest,
    responses(
        (status = 200, description = "Bag template updated", body = BagTemplateResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Bag template not found"),
        (status = 409, description = "Name already taken")
    ),
    tag = "Bags"
)]
pub async fn update_bag_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBagTemplateRequest>,
) -> AppResult<Json<BagTemplateResponse>> {
    validate_optional(&payload.name, "Name", 100)?;

    let input = UpdateBagTemplate {
        name: payload.name.map(|n| n.trim().to_string()),
        bag_type: payload.bag_type,
    };

    let template = state.templates.update_bag_template(id, &input).await?;
    Ok(Json(template.into()))
}

/// Delete a bag template that no trip uses
#[utoipa::path(
    delete,
    path = "/api/bags/{id}",
    params(
        ("id" = Uuid, Path, description = "Bag template ID")
    ),
    responses(
        (status = 204, description = "Bag template deleted"),
        (status = 404, description = "Bag template not found"),
        (status = 409, description = "Bag template is in use")
    ),
    tag = "Bags"
)]
pub async fn delete_bag_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.templates.delete_bag_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
