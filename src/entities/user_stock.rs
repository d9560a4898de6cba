use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-(user, town) stock assignment header. Created lazily on the first
/// allocation to a rep in a town; balances live in `user_stock_lines`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_stocks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub usercode: Option<String>,
    pub user_role: String,
    pub town_id: Uuid,
    pub town_name: String,
    pub towncode: String,
    pub region: String,
    pub area: String,
    pub territory: String,
    /// Timestamp of the last balance-affecting operation.
    pub modified: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_stock_line::Entity")]
    UserStockLine,
}

impl Related<super::user_stock_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserStockLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
