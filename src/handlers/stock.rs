use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::{
    reconciliation::SettleStockRequest, town_stock::ReceiveTownStockRequest,
    transfer::AllocateStockRequest, RepIdentity,
};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Mutating stock calls carry the authenticated rep's identity snapshot;
/// in production the auth layer populates it from the session.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReceiveStockBody {
    pub user: RepIdentity,
    #[serde(flatten)]
    pub request: ReceiveTownStockRequest,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AllocateStockBody {
    pub user: RepIdentity,
    #[serde(flatten)]
    pub request: AllocateStockRequest,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SettleStockBody {
    pub user: RepIdentity,
    #[serde(flatten)]
    pub request: SettleStockRequest,
}

pub fn stock_router() -> Router<AppState> {
    Router::new()
        .route("/town/receive", post(receive_town_stock))
        .route("/town/:town_id", get(get_town_stock))
        .route("/allocate", post(allocate_stock))
        .route("/settle", post(settle_stock))
        .route("/user/:user_id", get(get_user_stock))
        .route("/town-by-user/:user_id", get(get_town_stock_by_user))
}

#[utoipa::path(
    post,
    path = "/api/v1/stock/town/receive",
    request_body = ReceiveStockBody,
    responses(
        (status = 200, description = "Pool credited"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn receive_town_stock(
    State(state): State<AppState>,
    Json(body): Json<ReceiveStockBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let summary = state
        .services
        .town_stock
        .receive(body.user, body.request)
        .await?;
    Ok(Json(ApiResponse::success(summary)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stock/town/{town_id}",
    params(("town_id" = Uuid, Path, description = "Town id")),
    responses(
        (status = 200, description = "Current pool balances"),
        (status = 404, description = "No pool for town", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn get_town_stock(
    State(state): State<AppState>,
    Path(town_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let view = state.services.town_stock.get_by_town(town_id).await?;
    Ok(Json(ApiResponse::success(view)))
}

#[utoipa::path(
    post,
    path = "/api/v1/stock/allocate",
    request_body = AllocateStockBody,
    responses(
        (status = 200, description = "Quantity moved from town pool to rep stock", body = crate::services::transfer::AllocationSummary),
        (status = 404, description = "No pool for town", body = crate::errors::ErrorResponse),
        (status = 409, description = "Write conflict, retry", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn allocate_stock(
    State(state): State<AppState>,
    Json(body): Json<AllocateStockBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let summary = state
        .services
        .transfer
        .allocate(body.user, body.request)
        .await?;
    Ok(Json(ApiResponse::success(summary)))
}

#[utoipa::path(
    post,
    path = "/api/v1/stock/settle",
    request_body = SettleStockBody,
    responses(
        (status = 200, description = "Settlement recorded", body = crate::services::reconciliation::SettleOutcome),
        (status = 404, description = "No stock assignment", body = crate::errors::ErrorResponse),
        (status = 412, description = "Attendance missing", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn settle_stock(
    State(state): State<AppState>,
    Json(body): Json<SettleStockBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let outcome = state
        .services
        .reconciliation
        .settle(body.user, body.request)
        .await?;
    Ok(Json(ApiResponse::success(outcome)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stock/user/{user_id}",
    params(("user_id" = Uuid, Path, description = "Rep id")),
    responses(
        (status = 200, description = "Rep stock dashboard view")
    ),
    tag = "stock"
)]
pub async fn get_user_stock(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let overview = state.services.user_stock.get_user_stock(user_id).await?;
    Ok(Json(ApiResponse::success(overview)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stock/town-by-user/{user_id}",
    params(("user_id" = Uuid, Path, description = "Rep id")),
    responses(
        (status = 200, description = "Pool balances for the rep's towns")
    ),
    tag = "stock"
)]
pub async fn get_town_stock_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let overviews = state
        .services
        .user_stock
        .get_town_stock_by_user(user_id)
        .await?;
    Ok(Json(ApiResponse::success(overviews)))
}
