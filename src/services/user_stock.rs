use crate::{
    db::DbPool,
    entities::{
        attendance::{self, Entity as Attendance},
        material::{self, Entity as Material},
        sales_order::{self, Entity as SalesOrder},
        sales_order_item::{self, Entity as SalesOrderItem, LineKind},
        town_stock::{self, Entity as TownStock},
        town_stock_line::{self, Entity as TownStockLine},
        user_stock::{self, Entity as UserStock},
        user_stock_line::{self, Entity as UserStockLine},
    },
    errors::ServiceError,
    services::attendance::day_bounds,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// A balance line joined with its catalog entry for dashboard views.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrichedStockLine {
    pub material_id: Uuid,
    pub name: String,
    pub company: Option<String>,
    pub category: Option<String>,
    pub remaining: i32,
    pub pending: i32,
    pub unit_price: Option<Decimal>,
    pub image: Option<String>,
    pub size: Option<i32>,
    pub town_id: Uuid,
    pub town_name: String,
}

/// Same-day returned quantities aggregated from the rep's orders.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReturnItemView {
    pub material_id: Uuid,
    pub name: String,
    pub qty: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserStockOverview {
    pub stock: Vec<EnrichedStockLine>,
    pub return_items: Vec<ReturnItemView>,
    pub hand_over_amount: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TownStockOverview {
    pub town_id: Uuid,
    pub town_name: String,
    pub region: String,
    pub area: String,
    pub territory: String,
    pub material: Vec<EnrichedStockLine>,
}

/// Read-side projections over the two ledgers. Pure joins of current
/// balances with catalog data; no invariants beyond reflecting ledger
/// state, so no special concurrency handling.
#[derive(Clone)]
pub struct UserStockService {
    db_pool: Arc<DbPool>,
}

impl UserStockService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Everything the rep's stock dashboard needs: balances enriched with
    /// price/image/size, today's returned items, today's handover.
    #[instrument(skip(self))]
    pub async fn get_user_stock(&self, user_id: Uuid) -> Result<UserStockOverview, ServiceError> {
        let db = &*self.db_pool;

        let headers = UserStock::find()
            .filter(user_stock::Column::UserId.eq(user_id))
            .order_by_desc(user_stock::Column::CreatedAt)
            .all(db)
            .await?;

        let mut stock = Vec::new();
        for header in &headers {
            let lines = UserStockLine::find()
                .filter(user_stock_line::Column::UserStockId.eq(header.id))
                .order_by_asc(user_stock_line::Column::Name)
                .all(db)
                .await?;

            let catalog = self
                .catalog_by_ids(lines.iter().map(|l| l.material_id).collect())
                .await?;

            for line in lines {
                let entry = catalog.get(&line.material_id);
                stock.push(EnrichedStockLine {
                    material_id: line.material_id,
                    name: line.name,
                    company: line.company,
                    category: line.category,
                    remaining: line.remaining,
                    pending: line.pending,
                    unit_price: entry.map(|m| m.unit_price),
                    image: entry.and_then(|m| m.image.clone()),
                    size: entry.map(|m| m.size),
                    town_id: header.town_id,
                    town_name: header.town_name.clone(),
                });
            }
        }

        let return_items = self.todays_return_items(user_id).await?;
        let hand_over_amount = self.todays_handover(user_id).await?;

        Ok(UserStockOverview {
            stock,
            return_items,
            hand_over_amount,
        })
    }

    /// Pool balances for every town the rep holds stock in.
    #[instrument(skip(self))]
    pub async fn get_town_stock_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TownStockOverview>, ServiceError> {
        let db = &*self.db_pool;

        let town_ids: Vec<Uuid> = UserStock::find()
            .filter(user_stock::Column::UserId.eq(user_id))
            .select_only()
            .column(user_stock::Column::TownId)
            .distinct()
            .into_tuple()
            .all(db)
            .await?;

        let mut overviews = Vec::new();
        for town_id in town_ids {
            let Some(header) = TownStock::find()
                .filter(town_stock::Column::TownId.eq(town_id))
                .one(db)
                .await?
            else {
                continue;
            };

            let lines = TownStockLine::find()
                .filter(town_stock_line::Column::TownStockId.eq(header.id))
                .order_by_asc(town_stock_line::Column::Name)
                .all(db)
                .await?;

            let catalog = self
                .catalog_by_ids(lines.iter().map(|l| l.material_id).collect())
                .await?;

            let material = lines
                .into_iter()
                .map(|line| {
                    let entry = catalog.get(&line.material_id);
                    EnrichedStockLine {
                        material_id: line.material_id,
                        name: line.name,
                        company: Some(line.company),
                        category: Some(line.category),
                        remaining: line.remaining,
                        pending: line.pending,
                        unit_price: entry.map(|m| m.unit_price),
                        image: entry.and_then(|m| m.image.clone()),
                        size: entry.map(|m| m.size),
                        town_id: header.town_id,
                        town_name: header.town_name.clone(),
                    }
                })
                .collect();

            overviews.push(TownStockOverview {
                town_id: header.town_id,
                town_name: header.town_name,
                region: header.region,
                area: header.area,
                territory: header.territory,
                material,
            });
        }

        Ok(overviews)
    }

    async fn catalog_by_ids(
        &self,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, material::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let db = &*self.db_pool;
        let materials = Material::find()
            .filter(material::Column::Id.is_in(ids))
            .all(db)
            .await?;
        Ok(materials.into_iter().map(|m| (m.id, m)).collect())
    }

    async fn todays_return_items(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ReturnItemView>, ServiceError> {
        let db = &*self.db_pool;
        let (start, end) = day_bounds(Utc::now());

        let order_ids: Vec<Uuid> = SalesOrder::find()
            .filter(sales_order::Column::UserId.eq(user_id))
            .filter(sales_order::Column::CreatedAt.gte(start))
            .filter(sales_order::Column::CreatedAt.lt(end))
            .select_only()
            .column(sales_order::Column::Id)
            .into_tuple()
            .all(db)
            .await?;

        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = SalesOrderItem::find()
            .filter(sales_order_item::Column::OrderId.is_in(order_ids))
            .filter(sales_order_item::Column::Kind.eq(LineKind::Return.as_ref()))
            .all(db)
            .await?;

        let mut aggregated: HashMap<Uuid, ReturnItemView> = HashMap::new();
        for item in items {
            aggregated
                .entry(item.material_id)
                .and_modify(|view| view.qty += item.qty)
                .or_insert(ReturnItemView {
                    material_id: item.material_id,
                    name: item.name,
                    qty: item.qty,
                });
        }

        let mut views: Vec<ReturnItemView> = aggregated.into_values().collect();
        views.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(views)
    }

    async fn todays_handover(&self, user_id: Uuid) -> Result<Option<Decimal>, ServiceError> {
        let db = &*self.db_pool;
        let (start, end) = day_bounds(Utc::now());

        let entry = Attendance::find()
            .filter(attendance::Column::UserId.eq(user_id))
            .filter(attendance::Column::PunchInAt.gte(start))
            .filter(attendance::Column::PunchInAt.lt(end))
            .one(db)
            .await?;

        Ok(entry.and_then(|e| e.hand_over_amount))
    }
}
