use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outlet record owned by the outlet subsystem. The ledger only issues
/// targeted updates to the `last_*` denormalized fields when an order is
/// recorded; it never creates or deletes outlets.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outlets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub channel: String,
    pub route: String,
    pub routecode: Option<String>,
    pub outletcode: String,
    pub contact_no: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub last_visited_at: Option<DateTime<Utc>>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub last_order_amount: Option<Decimal>,
    pub last_order_delivered: Option<bool>,
    pub last_order_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
