use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-town stock pool header. One record per town, denormalized with the
/// town's hierarchy labels; balances live in `town_stock_lines`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "town_stocks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub town_id: Uuid,
    pub town_name: String,
    pub towncode: String,
    pub region: String,
    pub region_id: Option<Uuid>,
    pub area: String,
    pub area_id: Option<Uuid>,
    pub territory: String,
    pub territory_id: Option<Uuid>,
    /// Last administrative user that touched the pool.
    pub modifier: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::town_stock_line::Entity")]
    TownStockLine,
}

impl Related<super::town_stock_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TownStockLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
