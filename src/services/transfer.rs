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
    services::{RepIdentity, StockItemInput, TownRef},
};
use chrono::Utc;
use metrics::counter;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionError,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AllocateStockRequest {
    pub town: TownRef,
    #[validate(length(min = 1, message = "at least one material line is required"))]
    pub material: Vec<StockItemInput>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AllocationSummary {
    /// Town-side lines debited.
    pub town_modified_count: u64,
    /// User-side lines credited or created.
    pub user_modified_count: u64,
}

/// Moves material quantity from a town pool into a rep's stock.
///
/// The whole allocation is one transaction: every town-side debit is a
/// conditional update guarded by `remaining >= qty`, so a concurrent
/// allocation can never drive a balance negative; the first short material
/// aborts the unit with nothing applied.
#[derive(Clone)]
pub struct TransferService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
    retry_attempts: u32,
}

impl TransferService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender, retry_attempts: u32) -> Self {
        Self {
            db_pool,
            event_sender,
            retry_attempts: retry_attempts.max(1),
        }
    }

    /// Allocates the requested quantities from the town pool to `rep`.
    ///
    /// Retried whole on write conflict. Not idempotent: replaying an
    /// identical call applies it again.
    #[instrument(skip(self, request), fields(town_id = %request.town.id, user_id = %rep.id))]
    pub async fn allocate(
        &self,
        rep: RepIdentity,
        request: AllocateStockRequest,
    ) -> Result<AllocationSummary, ServiceError> {
        request.validate()?;
        request.town.validate()?;
        for item in &request.material {
            item.validate()?;
        }

        let mut attempt = 0;
        let summary = loop {
            attempt += 1;
            match self.try_allocate(&rep, &request).await {
                Err(err) if err.is_retryable() && attempt < self.retry_attempts => {
                    warn!(
                        attempt,
                        error = %err,
                        "Allocation hit a write conflict; retrying whole transaction"
                    );
                    tokio::time::sleep(Duration::from_millis(20 * attempt as u64)).await;
                }
                Err(err) if err.is_retryable() => {
                    return Err(ServiceError::WriteConflict(format!(
                        "allocation for town {} kept conflicting after {} attempts",
                        request.town.id, attempt
                    )));
                }
                other => break other?,
            }
        };

        counter!("fieldstock_ledger.allocations", 1);
        info!(
            town_modified = summary.town_modified_count,
            user_modified = summary.user_modified_count,
            "Stock allocated"
        );

        if let Err(e) = self
            .event_sender
            .send(Event::StockAllocated {
                town_id: request.town.id,
                user_id: rep.id,
                line_count: request.material.len(),
            })
            .await
        {
            warn!(error = %e, "Failed to send stock allocated event");
        }

        Ok(summary)
    }

    async fn try_allocate(
        &self,
        rep: &RepIdentity,
        request: &AllocateStockRequest,
    ) -> Result<AllocationSummary, ServiceError> {
        let db = &*self.db_pool;
        let rep = rep.clone();
        let request = request.clone();

        db.transaction::<_, AllocationSummary, ServiceError>(move |txn| {
            Box::pin(async move {
                let now = Utc::now();

                let town_stock = TownStock::find()
                    .filter(town_stock::Column::TownId.eq(request.town.id))
                    .one(txn)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!(
                            "No town stock exists for town {}",
                            request.town.id
                        ))
                    })?;

                let mut town_modified = 0u64;
                for item in &request.material {
                    let result = TownStockLine::update_many()
                        .col_expr(
                            town_stock_line::Column::Remaining,
                            Expr::col(town_stock_line::Column::Remaining).sub(item.qty),
                        )
                        .col_expr(town_stock_line::Column::UpdatedAt, Expr::value(now))
                        .filter(town_stock_line::Column::TownStockId.eq(town_stock.id))
                        .filter(town_stock_line::Column::MaterialId.eq(item.id))
                        .filter(town_stock_line::Column::Remaining.gte(item.qty))
                        .exec(txn)
                        .await?;

                    if result.rows_affected == 0 {
                        // Either the pool never held this material or the
                        // balance is short; both violate the sufficiency
                        // precondition.
                        return Err(ServiceError::InsufficientStock(item.name.clone()));
                    }
                    town_modified += result.rows_affected;
                }

                let header = UserStock::find()
                    .filter(user_stock::Column::TownId.eq(request.town.id))
                    .filter(user_stock::Column::UserId.eq(rep.id))
                    .one(txn)
                    .await?;

                let header = match header {
                    Some(existing) => {
                        let mut active: user_stock::ActiveModel = existing.clone().into();
                        active.modified = Set(now);
                        active.updated_at = Set(Some(now));
                        active.update(txn).await?
                    }
                    None => {
                        let fresh = user_stock::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            user_id: Set(rep.id),
                            user_name: Set(rep.name.clone()),
                            usercode: Set(rep.usercode.clone()),
                            user_role: Set(rep.role.clone()),
                            town_id: Set(request.town.id),
                            town_name: Set(request.town.name.clone()),
                            towncode: Set(request.town.towncode.clone()),
                            region: Set(request.town.region.clone()),
                            area: Set(request.town.area.clone()),
                            territory: Set(request.town.territory.clone()),
                            modified: Set(now),
                            created_at: Set(now),
                            updated_at: Set(Some(now)),
                        };
                        fresh.insert(txn).await?
                    }
                };

                let mut user_modified = 0u64;
                for item in &request.material {
                    let result = UserStockLine::update_many()
                        .col_expr(
                            user_stock_line::Column::Remaining,
                            Expr::col(user_stock_line::Column::Remaining).add(item.qty),
                        )
                        .col_expr(user_stock_line::Column::UpdatedAt, Expr::value(now))
                        .filter(user_stock_line::Column::UserStockId.eq(header.id))
                        .filter(user_stock_line::Column::MaterialId.eq(item.id))
                        .exec(txn)
                        .await?;

                    if result.rows_affected == 0 {
                        let line = user_stock_line::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            user_stock_id: Set(header.id),
                            material_id: Set(item.id),
                            name: Set(item.name.clone()),
                            company: Set(Some(item.company.clone())),
                            category: Set(Some(item.category.clone())),
                            remaining: Set(item.qty),
                            pending: Set(0),
                            updated_at: Set(Some(now)),
                        };
                        line.insert(txn).await?;
                    }
                    user_modified += 1;
                }

                for item in &request.material {
                    let movement = stock_movement::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        material_id: Set(item.id),
                        material_name: Set(item.name.clone()),
                        kind: Set(MovementKind::Allocate.as_ref().to_string()),
                        qty: Set(item.qty),
                        from_kind: Set(Some(PartyKind::Town.as_ref().to_string())),
                        from_id: Set(Some(request.town.id)),
                        to_kind: Set(Some(PartyKind::User.as_ref().to_string())),
                        to_id: Set(Some(rep.id)),
                        reference_type: Set(None),
                        reference_id: Set(None),
                        recorded_by: Set(rep.id),
                        created_at: Set(now),
                    };
                    movement.insert(txn).await?;
                }

                Ok(AllocationSummary {
                    town_modified_count: town_modified,
                    user_modified_count: user_modified,
                })
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })
    }
}
