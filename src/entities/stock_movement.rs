use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// What moved the quantity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum MovementKind {
    /// Administrative top-up of a town pool.
    Receive,
    /// Town pool to rep stock.
    Allocate,
    /// Rep stock debited by a sales order.
    Consume,
    /// Rep stock handed back to the town pool.
    Return,
    /// Write-off: quantity lost in the field, credited nowhere.
    Lost,
    /// Write-off: quantity damaged, credited nowhere.
    Damage,
}

/// Which side of a movement an id refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum PartyKind {
    Town,
    User,
    Outlet,
}

/// Append-only movement journal. Written in the same transaction as every
/// balance change, so balances stay a replayable projection of this log.
/// Lost and damaged quantities keep their own rows even though balances
/// collapse them into one write-off.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub material_id: Uuid,
    pub material_name: String,
    pub kind: String,
    pub qty: i32,
    pub from_kind: Option<String>,
    pub from_id: Option<Uuid>,
    pub to_kind: Option<String>,
    pub to_id: Option<Uuid>,
    pub reference_type: Option<String>,
    pub reference_id: Option<Uuid>,
    pub recorded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn movement_kind_round_trips_through_strings() {
        for kind in [
            MovementKind::Receive,
            MovementKind::Allocate,
            MovementKind::Consume,
            MovementKind::Return,
            MovementKind::Lost,
            MovementKind::Damage,
        ] {
            let parsed = MovementKind::from_str(kind.as_ref()).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn movement_kind_serializes_snake_case() {
        assert_eq!(MovementKind::Allocate.as_ref(), "allocate");
        assert_eq!(MovementKind::Damage.as_ref(), "damage");
    }
}
