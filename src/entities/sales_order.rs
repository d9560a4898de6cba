use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A field execution: the sales order a rep records against an outlet.
/// Carries denormalized user / outlet / town snapshots the way the rest of
/// the ledger does, so reporting never needs cross-subsystem joins.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,
    pub user_name: String,
    pub usercode: Option<String>,
    pub user_role: String,

    pub outlet_id: Uuid,
    pub outlet_name: String,
    pub outlet_channel: String,
    pub outlet_route: String,
    pub outlet_routecode: Option<String>,
    pub outletcode: String,
    pub outlet_lat: f64,
    pub outlet_lon: f64,

    pub town_id: Uuid,
    pub town_name: String,
    pub region: String,
    pub area: String,
    pub territory: String,
    pub towncode: String,

    pub execution_start_at: DateTime<Utc>,
    pub execution_end_at: DateTime<Utc>,
    pub duration: String,

    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_ordered_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub discount: Decimal,

    pub delivery_type: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub delivered: bool,

    pub exchange_remarks: Option<String>,
    pub return_remarks: Option<String>,

    /// Where the rep actually stood when submitting; advisory geofence.
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub distance: Option<f64>,
    pub within_radius: Option<bool>,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sales_order_item::Entity")]
    SalesOrderItem,
}

impl Related<super::sales_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
