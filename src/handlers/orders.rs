use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::{orders::CreateSalesOrderRequest, RepIdentity};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordSaleBody {
    pub user: RepIdentity,
    #[serde(flatten)]
    pub request: CreateSalesOrderRequest,
}

pub fn orders_router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_sale))
        .route("/:id", get(get_order))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = RecordSaleBody,
    responses(
        (status = 201, description = "Order recorded and stock debited", body = crate::services::orders::SalesOrderResponse),
        (status = 404, description = "No stock assignment for rep/town", body = crate::errors::ErrorResponse),
        (status = 409, description = "Write conflict, retry", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn record_sale(
    State(state): State<AppState>,
    Json(body): Json<RecordSaleBody>,
) -> Result<impl IntoResponse, ServiceError> {
    let response = state
        .services
        .orders
        .record_sale(body.user, body.request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with line items"),
        (status = 404, description = "Unknown order", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .orders
        .get_order(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", id)))?;
    Ok(Json(ApiResponse::success(order)))
}
