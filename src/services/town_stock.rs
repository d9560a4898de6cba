use crate::{
    db::DbPool,
    entities::{
        stock_movement::{self, MovementKind, PartyKind},
        town_stock::{self, Entity as TownStock},
        town_stock_line::{self, Entity as TownStockLine},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{RepIdentity, StockItemInput, TownRef},
};
use chrono::Utc;
use metrics::counter;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionError,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReceiveTownStockRequest {
    pub town: TownRef,
    #[validate(length(min = 1, message = "at least one material line is required"))]
    pub material: Vec<StockItemInput>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReceiveSummary {
    pub created_lines: u64,
    pub updated_lines: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TownStockView {
    #[schema(value_type = Object)]
    pub town: town_stock::Model,
    #[schema(value_type = Vec<Object>)]
    pub material: Vec<town_stock_line::Model>,
}

/// Owns the per-town stock pool: administrative top-ups and reads.
/// Transfers out of the pool live in `TransferService`; return credits in
/// `ReconciliationService`.
#[derive(Clone)]
pub struct TownStockService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl TownStockService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Credits received material into the town pool, creating the pool and
    /// any missing lines on first receipt. One transaction.
    #[instrument(skip(self, request), fields(town_id = %request.town.id))]
    pub async fn receive(
        &self,
        actor: RepIdentity,
        request: ReceiveTownStockRequest,
    ) -> Result<ReceiveSummary, ServiceError> {
        request.validate()?;
        request.town.validate()?;
        for item in &request.material {
            item.validate()?;
        }

        let db = &*self.db_pool;
        let actor_id = actor.id;
        let town_id = request.town.id;
        let line_count = request.material.len();
        let req = request.clone();

        let summary = db
            .transaction::<_, ReceiveSummary, ServiceError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();

                    let header = TownStock::find()
                        .filter(town_stock::Column::TownId.eq(req.town.id))
                        .one(txn)
                        .await?;

                    let header = match header {
                        Some(existing) => {
                            let mut active: town_stock::ActiveModel = existing.into();
                            active.modifier = Set(Some(actor_id));
                            active.updated_at = Set(Some(now));
                            active.update(txn).await?
                        }
                        None => {
                            let fresh = town_stock::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                town_id: Set(req.town.id),
                                town_name: Set(req.town.name.clone()),
                                towncode: Set(req.town.towncode.clone()),
                                region: Set(req.town.region.clone()),
                                region_id: Set(req.town.region_id),
                                area: Set(req.town.area.clone()),
                                area_id: Set(req.town.area_id),
                                territory: Set(req.town.territory.clone()),
                                territory_id: Set(req.town.territory_id),
                                modifier: Set(Some(actor_id)),
                                created_at: Set(now),
                                updated_at: Set(Some(now)),
                            };
                            fresh.insert(txn).await?
                        }
                    };

                    let mut created = 0u64;
                    let mut updated = 0u64;
                    for item in &req.material {
                        let result = TownStockLine::update_many()
                            .col_expr(
                                town_stock_line::Column::Remaining,
                                Expr::col(town_stock_line::Column::Remaining).add(item.qty),
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
                                company: Set(item.company.clone()),
                                category: Set(item.category.clone()),
                                remaining: Set(item.qty),
                                pending: Set(0),
                                updated_at: Set(Some(now)),
                            };
                            line.insert(txn).await?;
                            created += 1;
                        } else {
                            updated += result.rows_affected;
                        }

                        let movement = stock_movement::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            material_id: Set(item.id),
                            material_name: Set(item.name.clone()),
                            kind: Set(MovementKind::Receive.as_ref().to_string()),
                            qty: Set(item.qty),
                            from_kind: Set(None),
                            from_id: Set(None),
                            to_kind: Set(Some(PartyKind::Town.as_ref().to_string())),
                            to_id: Set(Some(req.town.id)),
                            reference_type: Set(None),
                            reference_id: Set(None),
                            recorded_by: Set(actor_id),
                            created_at: Set(now),
                        };
                        movement.insert(txn).await?;
                    }

                    Ok(ReceiveSummary {
                        created_lines: created,
                        updated_lines: updated,
                    })
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        counter!("fieldstock_ledger.receipts", 1);
        info!(
            created = summary.created_lines,
            updated = summary.updated_lines,
            "Town stock received"
        );

        if let Err(e) = self
            .event_sender
            .send(Event::StockReceived {
                town_id,
                line_count,
            })
            .await
        {
            warn!(error = %e, "Failed to send stock received event");
        }

        Ok(summary)
    }

    /// Current pool balances for one town.
    #[instrument(skip(self))]
    pub async fn get_by_town(&self, town_id: Uuid) -> Result<TownStockView, ServiceError> {
        let db = &*self.db_pool;

        let header = TownStock::find()
            .filter(town_stock::Column::TownId.eq(town_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No town stock exists for town {}", town_id))
            })?;

        let lines = TownStockLine::find()
            .filter(town_stock_line::Column::TownStockId.eq(header.id))
            .order_by_asc(town_stock_line::Column::Name)
            .all(db)
            .await?;

        Ok(TownStockView {
            town: header,
            material: lines,
        })
    }
}
