use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fieldstock API",
        version = "0.1.0",
        description = r#"
# Field-force material stock ledger

Moves promotional material from per-town stock pools to field reps, debits
rep stock when sales orders are recorded, and settles returned / lost /
damaged material back at end of cycle. Every balance mutation is a single
atomic unit with an append-only movement journal; balances never go
negative, even under concurrent writes.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::handlers::health::health_check,
        crate::handlers::materials::create_material,
        crate::handlers::materials::list_materials,
        crate::handlers::materials::materials_list,
        crate::handlers::materials::get_material,
        crate::handlers::materials::update_material,
        crate::handlers::materials::delete_material,
        crate::handlers::stock::receive_town_stock,
        crate::handlers::stock::get_town_stock,
        crate::handlers::stock::allocate_stock,
        crate::handlers::stock::settle_stock,
        crate::handlers::stock::get_user_stock,
        crate::handlers::stock::get_town_stock_by_user,
        crate::handlers::orders::record_sale,
        crate::handlers::orders::get_order,
    ),
    components(
        schemas(
            crate::ApiResponse<serde_json::Value>,
            crate::errors::ErrorResponse,
            crate::handlers::health::HealthResponse,
            crate::services::RepIdentity,
            crate::services::TownRef,
            crate::services::StockItemInput,
            crate::services::catalog::CreateMaterialRequest,
            crate::services::catalog::UpdateMaterialRequest,
            crate::services::catalog::MaterialOption,
            crate::services::town_stock::ReceiveTownStockRequest,
            crate::services::town_stock::ReceiveSummary,
            crate::services::town_stock::TownStockView,
            crate::services::transfer::AllocateStockRequest,
            crate::services::transfer::AllocationSummary,
            crate::services::reconciliation::SettleItemInput,
            crate::services::reconciliation::SettleStockRequest,
            crate::services::reconciliation::SettleOutcome,
            crate::services::orders::OutletSnapshot,
            crate::services::orders::OrderItemInput,
            crate::services::orders::CreateSalesOrderRequest,
            crate::services::orders::SalesOrderResponse,
            crate::services::user_stock::EnrichedStockLine,
            crate::services::user_stock::ReturnItemView,
            crate::services::user_stock::UserStockOverview,
            crate::services::user_stock::TownStockOverview,
        )
    ),
    tags(
        (name = "health", description = "Service health probes"),
        (name = "material", description = "Material catalog administration"),
        (name = "stock", description = "Town pool and rep stock ledger operations"),
        (name = "orders", description = "Sales order recording and lookup")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
