use crate::{
    db::DbPool,
    entities::{
        stock_movement::{self, MovementKind, PartyKind},
        town_stock::{self, Entity as TownStock},
        town_stock_line::{self, Entity as TownStockLine},
        user_stock::{self, Entity as UserStock},
        user_stock_line::{self, Entity as UserStockLine},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{attendance::AttendanceService, RepIdentity, TownRef},
};
use chrono::Utc;
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set,
    TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One material being settled: how much comes back to the town pool and
/// how much is written off as lost or damaged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SettleItemInput {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    pub company: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub return_qty: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub lost_qty: i32,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub damage_qty: i32,
}

impl SettleItemInput {
    fn total(&self) -> i32 {
        self.return_qty + self.lost_qty + self.damage_qty
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SettleStockRequest {
    pub town: TownRef,
    #[validate(length(min = 1, message = "at least one settlement line is required"))]
    pub items: Vec<SettleItemInput>,
    pub hand_over_amount: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettleOutcome {
    pub message: String,
}

/// End-of-cycle settlement: debits the rep's stock by returned + lost +
/// damaged quantities, credits the town pool with the returned portion
/// only, and records the optional cash handover. One atomic unit, gated
/// on a same-day attendance check-in.
#[derive(Clone)]
pub struct ReconciliationService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
    attendance: Arc<AttendanceService>,
    retry_attempts: u32,
}

impl ReconciliationService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: EventSender,
        attendance: Arc<AttendanceService>,
        retry_attempts: u32,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            attendance,
            retry_attempts: retry_attempts.max(1),
        }
    }

    #[instrument(skip(self, request), fields(town_id = %request.town.id, user_id = %rep.id))]
    pub async fn settle(
        &self,
        rep: RepIdentity,
        request: SettleStockRequest,
    ) -> Result<SettleOutcome, ServiceError> {
        request.validate()?;
        request.town.validate()?;
        for item in &request.items {
            item.validate()?;
            if item.total() == 0 {
                return Err(ServiceError::InvalidInput(format!(
                    "settlement line for material '{}' moves no quantity",
                    item.name
                )));
            }
        }

        // Gate before any stock is touched; re-checked implicitly by the
        // handover update inside the transaction.
        if !self
            .attendance
            .checked_in_today(rep.id, request.town.id)
            .await?
        {
            return Err(ServiceError::PreconditionFailed(
                "attendance not submitted for today".to_string(),
            ));
        }

        let mut attempt = 0;
        let totals = loop {
            attempt += 1;
            match self.try_settle(&rep, &request).await {
                Err(err) if err.is_retryable() && attempt < self.retry_attempts => {
                    warn!(
                        attempt,
                        error = %err,
                        "Settlement hit a write conflict; retrying whole transaction"
                    );
                    tokio::time::sleep(Duration::from_millis(20 * attempt as u64)).await;
                }
                Err(err) if err.is_retryable() => {
                    return Err(ServiceError::WriteConflict(format!(
                        "settlement for town {} kept conflicting after {} attempts",
                        request.town.id, attempt
                    )));
                }
                other => break other?,
            }
        };

        counter!("fieldstock_ledger.settlements", 1);
        info!(
            returned = totals.0,
            lost = totals.1,
            damaged = totals.2,
            "Stock settled"
        );

        if let Err(e) = self
            .event_sender
            .send(Event::StockSettled {
                town_id: request.town.id,
                user_id: rep.id,
                returned: totals.0,
                lost: totals.1,
                damaged: totals.2,
            })
            .await
        {
            warn!(error = %e, "Failed to send stock settled event");
        }

        Ok(SettleOutcome {
            message: "Material settlement recorded successfully".to_string(),
        })
    }

    async fn try_settle(
        &self,
        rep: &RepIdentity,
        request: &SettleStockRequest,
    ) -> Result<(i32, i32, i32), ServiceError> {
        let db = &*self.db_pool;
        let rep = rep.clone();
        let request = request.clone();
        let attendance = self.attendance.clone();

        db.transaction::<_, (i32, i32, i32), ServiceError>(move |txn| {
            Box::pin(async move {
                let now = Utc::now();

                let header = UserStock::find()
                    .filter(user_stock::Column::TownId.eq(request.town.id))
                    .filter(user_stock::Column::UserId.eq(rep.id))
                    .one(txn)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!(
                            "No stock assignment exists for user {} in town {}",
                            rep.id, request.town.id
                        ))
                    })?;

                let mut returned = 0;
                let mut lost = 0;
                let mut damaged = 0;

                for item in &request.items {
                    let total = item.total();

                    let result = UserStockLine::update_many()
                        .col_expr(
                            user_stock_line::Column::Remaining,
                            Expr::col(user_stock_line::Column::Remaining).sub(total),
                        )
                        .col_expr(user_stock_line::Column::UpdatedAt, Expr::value(now))
                        .filter(user_stock_line::Column::UserStockId.eq(header.id))
                        .filter(user_stock_line::Column::MaterialId.eq(item.id))
                        .filter(user_stock_line::Column::Remaining.gte(total))
                        .exec(txn)
                        .await?;

                    if result.rows_affected == 0 {
                        return Err(ServiceError::InsufficientStock(item.name.clone()));
                    }

                    if item.return_qty > 0 {
                        credit_town_pool(txn, &request.town, item, rep.id, now).await?;
                        returned += item.return_qty;
                    }
                    lost += item.lost_qty;
                    damaged += item.damage_qty;

                    // Journal the split: lost and damaged keep their own
                    // rows even though the balance change is one debit.
                    for (kind, qty, to) in [
                        (MovementKind::Return, item.return_qty, Some(request.town.id)),
                        (MovementKind::Lost, item.lost_qty, None),
                        (MovementKind::Damage, item.damage_qty, None),
                    ] {
                        if qty == 0 {
                            continue;
                        }
                        let movement = stock_movement::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            material_id: Set(item.id),
                            material_name: Set(item.name.clone()),
                            kind: Set(kind.as_ref().to_string()),
                            qty: Set(qty),
                            from_kind: Set(Some(PartyKind::User.as_ref().to_string())),
                            from_id: Set(Some(rep.id)),
                            to_kind: Set(to.map(|_| PartyKind::Town.as_ref().to_string())),
                            to_id: Set(to),
                            reference_type: Set(None),
                            reference_id: Set(None),
                            recorded_by: Set(rep.id),
                            created_at: Set(now),
                        };
                        movement.insert(txn).await?;
                    }
                }

                let mut active: user_stock::ActiveModel = header.into();
                active.modified = Set(now);
                active.updated_at = Set(Some(now));
                active.update(txn).await?;

                if let Some(amount) = request.hand_over_amount {
                    attendance
                        .record_handover(txn, rep.id, request.town.id, amount)
                        .await?;
                }

                Ok((returned, lost, damaged))
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })
    }
}

/// Credits the returned portion back into the town pool. The pool header
/// and line are upserted: a rep can only return what a town once held, but
/// administrative cleanups may have removed the row in between.
async fn credit_town_pool(
    txn: &DatabaseTransaction,
    town: &TownRef,
    item: &SettleItemInput,
    actor: Uuid,
    now: chrono::DateTime<Utc>,
) -> Result<(), ServiceError> {
    let header = TownStock::find()
        .filter(town_stock::Column::TownId.eq(town.id))
        .one(txn)
        .await?;

    let header = match header {
        Some(existing) => existing,
        None => {
            let fresh = town_stock::ActiveModel {
                id: Set(Uuid::new_v4()),
                town_id: Set(town.id),
                town_name: Set(town.name.clone()),
                towncode: Set(town.towncode.clone()),
                region: Set(town.region.clone()),
                region_id: Set(town.region_id),
                area: Set(town.area.clone()),
                area_id: Set(town.area_id),
                territory: Set(town.territory.clone()),
                territory_id: Set(town.territory_id),
                modifier: Set(Some(actor)),
                created_at: Set(now),
                updated_at: Set(Some(now)),
            };
            fresh.insert(txn).await?
        }
    };

    let result = TownStockLine::update_many()
        .col_expr(
            town_stock_line::Column::Remaining,
            Expr::col(town_stock_line::Column::Remaining).add(item.return_qty),
        )
        .col_expr(town_stock_line::Column::UpdatedAt, Expr::value(now))
        .filter(town_stock_line::Column::TownStockId.eq(header.id))
        .filter(town_stock_line::Column::MaterialId.eq(item.id))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        let line = town_stock_line::ActiveModel {
            id: Set(Uuid::new_v4()),
            town_stock_id: Set(header.id),
            material_id: Set(item.id),
            name: Set(item.name.clone()),
            company: Set(item.company.clone().unwrap_or_default()),
            category: Set(String::new()),
            remaining: Set(item.return_qty),
            pending: Set(0),
            updated_at: Set(Some(now)),
        };
        line.insert(txn).await?;
    }

    Ok(())
}
