pub mod attendance;
pub mod catalog;
pub mod consumption;
pub mod orders;
pub mod reconciliation;
pub mod town_stock;
pub mod transfer;
pub mod user_stock;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Identity of the authenticated field rep issuing a ledger call. Populated
/// by the auth layer (external collaborator); the ledger only needs an id
/// and display fields and stays role-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepIdentity {
    pub id: Uuid,
    pub name: String,
    pub usercode: Option<String>,
    pub role: String,
}

/// Denormalized town snapshot carried on stock requests, mirroring what the
/// org-hierarchy subsystem hands out.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TownRef {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub towncode: String,
    #[validate(length(min = 1))]
    pub region: String,
    pub region_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub area: String,
    pub area_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub territory: String,
    pub territory_id: Option<Uuid>,
}

/// One material line on a receive or allocate request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct StockItemInput {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 1))]
    pub qty: i32,
}

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<catalog::StockCatalogService>,
    pub town_stock: Arc<town_stock::TownStockService>,
    pub transfer: Arc<transfer::TransferService>,
    pub orders: Arc<orders::SalesOrderService>,
    pub reconciliation: Arc<reconciliation::ReconciliationService>,
    pub user_stock: Arc<user_stock::UserStockService>,
    pub attendance: Arc<attendance::AttendanceService>,
}

impl AppServices {
    /// Builds the service container shared by all handlers.
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender, config: &AppConfig) -> Self {
        let attendance = Arc::new(attendance::AttendanceService::new(db_pool.clone()));
        let consumption = Arc::new(consumption::ConsumptionService::new());

        let catalog = Arc::new(catalog::StockCatalogService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let town_stock = Arc::new(town_stock::TownStockService::new(
            db_pool.clone(),
            event_sender.clone(),
        ));
        let transfer = Arc::new(transfer::TransferService::new(
            db_pool.clone(),
            event_sender.clone(),
            config.txn_retry_attempts,
        ));
        let orders = Arc::new(orders::SalesOrderService::new(
            db_pool.clone(),
            event_sender.clone(),
            consumption,
            config.geofence_radius_m,
            config.txn_retry_attempts,
        ));
        let reconciliation = Arc::new(reconciliation::ReconciliationService::new(
            db_pool.clone(),
            event_sender,
            attendance.clone(),
            config.txn_retry_attempts,
        ));
        let user_stock = Arc::new(user_stock::UserStockService::new(db_pool));

        Self {
            catalog,
            town_stock,
            transfer,
            orders,
            reconciliation,
            user_stock,
            attendance,
        }
    }
}
