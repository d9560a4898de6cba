use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::catalog::{CreateMaterialRequest, MaterialFilter, UpdateMaterialRequest};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}
fn default_limit() -> u64 {
    10
}

pub fn materials_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_materials).post(create_material))
        .route("/material-list", get(materials_list))
        .route(
            "/:id",
            get(get_material).put(update_material).delete(delete_material),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/material",
    request_body = CreateMaterialRequest,
    responses(
        (status = 201, description = "Material created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "material"
)]
pub async fn create_material(
    State(state): State<AppState>,
    Json(request): Json<CreateMaterialRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let material = state.services.catalog.create(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(material))))
}

#[utoipa::path(
    get,
    path = "/api/v1/material",
    params(MaterialFilter, PageQuery),
    responses(
        (status = 200, description = "Filtered catalog page")
    ),
    tag = "material"
)]
pub async fn list_materials(
    State(state): State<AppState>,
    Query(filter): Query<MaterialFilter>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let materials = state
        .services
        .catalog
        .get_all(filter, page.page, page.limit)
        .await?;
    Ok(Json(ApiResponse::success(materials)))
}

#[utoipa::path(
    get,
    path = "/api/v1/material/material-list",
    responses(
        (status = 200, description = "Label/value projection of the catalog")
    ),
    tag = "material"
)]
pub async fn materials_list(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let options = state.services.catalog.materials_list().await?;
    Ok(Json(ApiResponse::success(options)))
}

#[utoipa::path(
    get,
    path = "/api/v1/material/{id}",
    params(("id" = Uuid, Path, description = "Material id")),
    responses(
        (status = 200, description = "Material found"),
        (status = 404, description = "Unknown material", body = crate::errors::ErrorResponse)
    ),
    tag = "material"
)]
pub async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let material = state.services.catalog.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(material)))
}

#[utoipa::path(
    put,
    path = "/api/v1/material/{id}",
    params(("id" = Uuid, Path, description = "Material id")),
    request_body = UpdateMaterialRequest,
    responses(
        (status = 200, description = "Material updated"),
        (status = 404, description = "Unknown material", body = crate::errors::ErrorResponse)
    ),
    tag = "material"
)]
pub async fn update_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaterialRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let material = state.services.catalog.update(id, request).await?;
    Ok(Json(ApiResponse::success(material)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/material/{id}",
    params(("id" = Uuid, Path, description = "Material id")),
    responses(
        (status = 200, description = "Material deleted"),
        (status = 404, description = "Unknown material", body = crate::errors::ErrorResponse)
    ),
    tag = "material"
)]
pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.catalog.delete(id).await?;
    Ok(Json(ApiResponse::success(true)))
}
