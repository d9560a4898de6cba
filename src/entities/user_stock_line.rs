use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One material balance held by a rep in a town. `remaining >= 0` always.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_stock_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_stock_id: Uuid,
    pub material_id: Uuid,
    pub name: String,
    pub company: Option<String>,
    pub category: Option<String>,
    pub remaining: i32,
    pub pending: i32,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_stock::Entity",
        from = "Column::UserStockId",
        to = "super::user_stock::Column::Id"
    )]
    UserStock,
}

impl Related<super::user_stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserStock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
