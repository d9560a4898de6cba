use crate::{
    entities::{
        stock_movement::{self, MovementKind, PartyKind},
        user_stock::{self, Entity as UserStock},
        user_stock_line::{self, Entity as UserStockLine},
    },
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set,
};
use tracing::debug;
use uuid::Uuid;

/// One material line being consumed by a sales order.
#[derive(Debug, Clone)]
pub struct ConsumedItem {
    pub material_id: Uuid,
    pub name: String,
    pub qty: i32,
}

/// Debits a rep's stock when a sales order is recorded.
///
/// Unit-of-work collaborator: every method operates on a caller-provided
/// transaction so the order record, the stock debit and the outlet update
/// commit or roll back together. It never opens its own transaction.
#[derive(Clone, Default)]
pub struct ConsumptionService;

impl ConsumptionService {
    pub fn new() -> Self {
        Self
    }

    /// Debits each item from the rep's stock in `town`, guarded by
    /// `remaining >= qty`, and journals a Consume movement per line.
    ///
    /// Errors leave the caller's transaction poisoned on purpose: the
    /// caller must abort the whole unit.
    pub async fn debit_user_stock(
        &self,
        txn: &DatabaseTransaction,
        town_id: Uuid,
        user_id: Uuid,
        outlet_id: Uuid,
        order_id: Uuid,
        items: &[ConsumedItem],
    ) -> Result<(), ServiceError> {
        let now = Utc::now();

        let header = UserStock::find()
            .filter(user_stock::Column::TownId.eq(town_id))
            .filter(user_stock::Column::UserId.eq(user_id))
            .one(txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "No stock assignment exists for user {} in town {}",
                    user_id, town_id
                ))
            })?;

        for item in items {
            let result = UserStockLine::update_many()
                .col_expr(
                    user_stock_line::Column::Remaining,
                    Expr::col(user_stock_line::Column::Remaining).sub(item.qty),
                )
                .col_expr(user_stock_line::Column::UpdatedAt, Expr::value(now))
                .filter(user_stock_line::Column::UserStockId.eq(header.id))
                .filter(user_stock_line::Column::MaterialId.eq(item.material_id))
                .filter(user_stock_line::Column::Remaining.gte(item.qty))
                .exec(txn)
                .await?;

            if result.rows_affected == 0 {
                return Err(ServiceError::InsufficientStock(item.name.clone()));
            }

            let movement = stock_movement::ActiveModel {
                id: Set(Uuid::new_v4()),
                material_id: Set(item.material_id),
                material_name: Set(item.name.clone()),
                kind: Set(MovementKind::Consume.as_ref().to_string()),
                qty: Set(item.qty),
                from_kind: Set(Some(PartyKind::User.as_ref().to_string())),
                from_id: Set(Some(user_id)),
                to_kind: Set(Some(PartyKind::Outlet.as_ref().to_string())),
                to_id: Set(Some(outlet_id)),
                reference_type: Set(Some("sales_order".to_string())),
                reference_id: Set(Some(order_id)),
                recorded_by: Set(user_id),
                created_at: Set(now),
            };
            movement.insert(txn).await?;
        }

        // Touch the header so "modified" reflects the latest debit.
        let mut active: user_stock::ActiveModel = header.into();
        active.modified = Set(now);
        active.updated_at = Set(Some(now));
        active.update(txn).await?;

        debug!(order_id = %order_id, "User stock debited for sales order");
        Ok(())
    }
}
