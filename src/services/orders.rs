use crate::{
    db::DbPool,
    entities::{
        outlet::{self, Entity as Outlet},
        sales_order::{self, Entity as SalesOrder},
        sales_order_item::{self, Entity as SalesOrderItem, LineKind},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{consumption::ConsumedItem, consumption::ConsumptionService, RepIdentity, TownRef},
};
use chrono::{DateTime, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionError,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OutletSnapshot {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub channel: String,
    #[validate(length(min = 1))]
    pub route: String,
    pub routecode: Option<String>,
    #[validate(length(min = 1))]
    pub outletcode: String,
    pub contact_no: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemInput {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub qty: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    #[serde(default)]
    pub size: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSalesOrderRequest {
    pub outlet: OutletSnapshot,
    pub town: TownRef,
    pub execution_start_at: DateTime<Utc>,
    pub execution_end_at: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub duration: String,
    #[validate(length(min = 1, message = "an order needs at least one item"))]
    pub order_items: Vec<OrderItemInput>,
    #[serde(default)]
    pub exchange_items: Vec<OrderItemInput>,
    #[serde(default)]
    pub return_items: Vec<OrderItemInput>,
    pub total_ordered_amount: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub delivery_type: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub exchange_remarks: Option<String>,
    pub return_remarks: Option<String>,
    /// Where the rep stood when submitting, for the advisory geofence.
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SalesOrderResponse {
    #[schema(value_type = Object)]
    pub order: sales_order::Model,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<sales_order_item::Model>,
}

/// Records sales orders. Order record, stock debit and outlet last-visit
/// update form one atomic unit; the debit itself is delegated to
/// `ConsumptionService` inside the same transaction.
#[derive(Clone)]
pub struct SalesOrderService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
    consumption: Arc<ConsumptionService>,
    geofence_radius_m: f64,
    retry_attempts: u32,
}

impl SalesOrderService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: EventSender,
        consumption: Arc<ConsumptionService>,
        geofence_radius_m: f64,
        retry_attempts: u32,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            consumption,
            geofence_radius_m,
            retry_attempts: retry_attempts.max(1),
        }
    }

    /// Records a sale against an outlet, debiting the rep's stock for every
    /// order item. Exchange and return lines are persisted but do not touch
    /// balances here; the geofence annotation is advisory and never blocks.
    #[instrument(skip(self, request), fields(user_id = %rep.id, outlet_id = %request.outlet.id))]
    pub async fn record_sale(
        &self,
        rep: RepIdentity,
        request: CreateSalesOrderRequest,
    ) -> Result<SalesOrderResponse, ServiceError> {
        request.validate()?;
        request.town.validate()?;
        request.outlet.validate()?;
        for item in request
            .order_items
            .iter()
            .chain(&request.exchange_items)
            .chain(&request.return_items)
        {
            item.validate()?;
        }

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            match self.try_record_sale(&rep, &request).await {
                Err(err) if err.is_retryable() && attempt < self.retry_attempts => {
                    warn!(
                        attempt,
                        error = %err,
                        "Sales order hit a write conflict; retrying whole transaction"
                    );
                    tokio::time::sleep(Duration::from_millis(20 * attempt as u64)).await;
                }
                Err(err) if err.is_retryable() => {
                    return Err(ServiceError::WriteConflict(format!(
                        "sales order for outlet {} kept conflicting after {} attempts",
                        request.outlet.id, attempt
                    )));
                }
                other => break other?,
            }
        };

        counter!("fieldstock_ledger.sales_orders", 1);
        info!(order_id = %response.order.id, "Sales order recorded");

        if let Err(e) = self
            .event_sender
            .send(Event::OrderCreated(response.order.id))
            .await
        {
            warn!(error = %e, order_id = %response.order.id, "Failed to send order created event");
        }

        Ok(response)
    }

    async fn try_record_sale(
        &self,
        rep: &RepIdentity,
        request: &CreateSalesOrderRequest,
    ) -> Result<SalesOrderResponse, ServiceError> {
        let db = &*self.db_pool;
        let rep = rep.clone();
        let request = request.clone();
        let consumption = self.consumption.clone();

        // Advisory geofence: annotate, never block.
        let (distance, within_radius) = match (request.lat, request.lon) {
            (Some(lat), Some(lon)) => {
                let d = haversine_distance_m(request.outlet.lat, request.outlet.lon, lat, lon);
                let d = (d * 100.0).round() / 100.0;
                (Some(d), Some(d <= self.geofence_radius_m))
            }
            _ => (None, None),
        };

        db.transaction::<_, SalesOrderResponse, ServiceError>(move |txn| {
            Box::pin(async move {
                let now = Utc::now();
                let order_id = Uuid::new_v4();

                let order = sales_order::ActiveModel {
                    id: Set(order_id),
                    user_id: Set(rep.id),
                    user_name: Set(rep.name.clone()),
                    usercode: Set(rep.usercode.clone()),
                    user_role: Set(rep.role.clone()),
                    outlet_id: Set(request.outlet.id),
                    outlet_name: Set(request.outlet.name.clone()),
                    outlet_channel: Set(request.outlet.channel.clone()),
                    outlet_route: Set(request.outlet.route.clone()),
                    outlet_routecode: Set(request.outlet.routecode.clone()),
                    outletcode: Set(request.outlet.outletcode.clone()),
                    outlet_lat: Set(request.outlet.lat),
                    outlet_lon: Set(request.outlet.lon),
                    town_id: Set(request.town.id),
                    town_name: Set(request.town.name.clone()),
                    region: Set(request.town.region.clone()),
                    area: Set(request.town.area.clone()),
                    territory: Set(request.town.territory.clone()),
                    towncode: Set(request.town.towncode.clone()),
                    execution_start_at: Set(request.execution_start_at),
                    execution_end_at: Set(request.execution_end_at),
                    duration: Set(request.duration.clone()),
                    total_ordered_amount: Set(request.total_ordered_amount),
                    discount: Set(request.discount),
                    delivery_type: Set(request.delivery_type.clone()),
                    delivery_date: Set(request.delivery_date),
                    payment_method: Set(request.payment_method.clone()),
                    delivered: Set(false),
                    exchange_remarks: Set(request.exchange_remarks.clone()),
                    return_remarks: Set(request.return_remarks.clone()),
                    lat: Set(request.lat),
                    lon: Set(request.lon),
                    distance: Set(distance),
                    within_radius: Set(within_radius),
                    created_at: Set(now),
                };
                let order = order.insert(txn).await?;

                let mut items = Vec::new();
                for (kind, lines) in [
                    (LineKind::Order, &request.order_items),
                    (LineKind::Exchange, &request.exchange_items),
                    (LineKind::Return, &request.return_items),
                ] {
                    for line in lines {
                        let item = sales_order_item::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            order_id: Set(order_id),
                            material_id: Set(line.id),
                            name: Set(line.name.clone()),
                            kind: Set(kind.as_ref().to_string()),
                            qty: Set(line.qty),
                            unit_price: Set(line.unit_price),
                            total_price: Set(line.total_price),
                            size: Set(line.size),
                        };
                        items.push(item.insert(txn).await?);
                    }
                }

                let consumed: Vec<ConsumedItem> = request
                    .order_items
                    .iter()
                    .map(|line| ConsumedItem {
                        material_id: line.id,
                        name: line.name.clone(),
                        qty: line.qty,
                    })
                    .collect();
                consumption
                    .debit_user_stock(
                        txn,
                        request.town.id,
                        rep.id,
                        request.outlet.id,
                        order_id,
                        &consumed,
                    )
                    .await?;

                // Denormalized last-visit fields on the outlet, owned by the
                // outlet subsystem; a missing row is its concern, not ours.
                let result = Outlet::update_many()
                    .col_expr(outlet::Column::LastVisitedAt, Expr::value(now))
                    .col_expr(
                        outlet::Column::LastOrderAmount,
                        Expr::value(request.total_ordered_amount),
                    )
                    .col_expr(outlet::Column::LastOrderDelivered, Expr::value(false))
                    .col_expr(outlet::Column::LastOrderId, Expr::value(order_id))
                    .col_expr(outlet::Column::UpdatedAt, Expr::value(now))
                    .filter(outlet::Column::Id.eq(request.outlet.id))
                    .exec(txn)
                    .await?;
                if result.rows_affected == 0 {
                    debug!(outlet_id = %request.outlet.id, "Outlet row absent; last-visit update skipped");
                }

                Ok(SalesOrderResponse { order, items })
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
            TransactionError::Transaction(service_err) => service_err,
        })
    }

    /// Fetches one order with its lines.
    #[instrument(skip(self))]
    pub async fn get_order(
        &self,
        order_id: Uuid,
    ) -> Result<Option<SalesOrderResponse>, ServiceError> {
        let db = &*self.db_pool;

        let order = SalesOrder::find_by_id(order_id).one(db).await?;
        let Some(order) = order else {
            return Ok(None);
        };

        let items = SalesOrderItem::find()
            .filter(sales_order_item::Column::OrderId.eq(order_id))
            .all(db)
            .await?;

        Ok(Some(SalesOrderResponse { order, items }))
    }
}

/// Great-circle distance in meters between two (lat, lon) points.
fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_M: f64 = 6_371_000.0;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_for_identical_points() {
        assert_eq!(haversine_distance_m(23.8103, 90.4125, 23.8103, 90.4125), 0.0);
    }

    #[test]
    fn haversine_matches_known_distance() {
        // Dhaka to Chattogram, roughly 215 km.
        let d = haversine_distance_m(23.8103, 90.4125, 22.3569, 91.7832);
        assert!((200_000.0..230_000.0).contains(&d), "got {}", d);
    }

    #[test]
    fn haversine_short_hop_is_within_default_radius() {
        // ~11 m of latitude.
        let d = haversine_distance_m(23.8103, 90.4125, 23.8104, 90.4125);
        assert!(d < 50.0, "got {}", d);
    }
}
