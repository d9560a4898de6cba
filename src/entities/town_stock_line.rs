use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One material balance inside a town stock pool.
///
/// `remaining >= 0` at all times; decrements are issued as conditional
/// updates guarded by that invariant.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "town_stock_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub town_stock_id: Uuid,
    pub material_id: Uuid,
    pub name: String,
    pub company: String,
    pub category: String,
    pub remaining: i32,
    pub pending: i32,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::town_stock::Entity",
        from = "Column::TownStockId",
        to = "super::town_stock::Column::Id"
    )]
    TownStock,
}

impl Related<super::town_stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TownStock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
