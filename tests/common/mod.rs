#![allow(dead_code)]

use chrono::Utc;
use fieldstock_api::{
    config::AppConfig,
    db,
    entities::{
        attendance, outlet, town_stock, town_stock_line, user_stock, user_stock_line,
        town_stock::Entity as TownStock, town_stock_line::Entity as TownStockLine,
        user_stock::Entity as UserStock, user_stock_line::Entity as UserStockLine,
    },
    events::{process_events, EventSender},
    services::{AppServices, RepIdentity, StockItemInput, TownRef},
};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Spins up an in-memory database with migrations applied and the full
/// service container wired against it.
pub async fn test_services() -> (Arc<DatabaseConnection>, AppServices) {
    let cfg = AppConfig::new(
        "sqlite::memory:".to_string(),
        "127.0.0.1".to_string(),
        0,
        "test".to_string(),
    );
    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .expect("db connect");
    db::run_migrations(&pool).await.expect("migrations");

    let db_arc = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);
    let sender = EventSender::new(tx);
    tokio::spawn(process_events(rx));

    let services = AppServices::new(db_arc.clone(), sender, &cfg);
    (db_arc, services)
}

pub fn rep() -> RepIdentity {
    RepIdentity {
        id: Uuid::new_v4(),
        name: "Rahim Uddin".to_string(),
        usercode: Some("DFF-0042".to_string()),
        role: "dff".to_string(),
    }
}

pub fn town() -> TownRef {
    TownRef {
        id: Uuid::new_v4(),
        name: "Savar".to_string(),
        towncode: "SAV-01".to_string(),
        region: "Dhaka".to_string(),
        region_id: Some(Uuid::new_v4()),
        area: "Dhaka North".to_string(),
        area_id: Some(Uuid::new_v4()),
        territory: "Savar Territory".to_string(),
        territory_id: Some(Uuid::new_v4()),
    }
}

pub fn stock_item(id: Uuid, name: &str, qty: i32) -> StockItemInput {
    StockItemInput {
        id,
        name: name.to_string(),
        company: "acme-foods".to_string(),
        category: "display".to_string(),
        qty,
    }
}

/// Current `remaining` for a material in a town pool; panics if absent.
pub async fn town_remaining(db: &DatabaseConnection, town_id: Uuid, material_id: Uuid) -> i32 {
    let header = TownStock::find()
        .filter(town_stock::Column::TownId.eq(town_id))
        .one(db)
        .await
        .expect("query town stock")
        .expect("town stock header");
    TownStockLine::find()
        .filter(town_stock_line::Column::TownStockId.eq(header.id))
        .filter(town_stock_line::Column::MaterialId.eq(material_id))
        .one(db)
        .await
        .expect("query town line")
        .expect("town line")
        .remaining
}

/// Current `remaining` for a material held by a rep, `None` if the rep has
/// no line for it (or no stock record at all).
pub async fn user_remaining(
    db: &DatabaseConnection,
    town_id: Uuid,
    user_id: Uuid,
    material_id: Uuid,
) -> Option<i32> {
    let header = UserStock::find()
        .filter(user_stock::Column::TownId.eq(town_id))
        .filter(user_stock::Column::UserId.eq(user_id))
        .one(db)
        .await
        .expect("query user stock")?;
    UserStockLine::find()
        .filter(user_stock_line::Column::UserStockId.eq(header.id))
        .filter(user_stock_line::Column::MaterialId.eq(material_id))
        .one(db)
        .await
        .expect("query user line")
        .map(|line| line.remaining)
}

/// Seeds a same-day punch-in so reconciliation's attendance gate passes.
pub async fn punch_in(db: &DatabaseConnection, rep: &RepIdentity, town_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();
    attendance::ActiveModel {
        id: Set(id),
        user_id: Set(rep.id),
        user_name: Set(rep.name.clone()),
        town_id: Set(town_id),
        punch_in_at: Set(Utc::now()),
        punch_out_at: Set(None),
        hand_over_amount: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .expect("insert attendance");
    id
}

/// Seeds an outlet row the order flow can stamp last-visit fields onto.
pub async fn seed_outlet(db: &DatabaseConnection) -> outlet::Model {
    outlet::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Mita General Store".to_string()),
        channel: Set("grocery".to_string()),
        route: Set("route-7".to_string()),
        routecode: Set(Some("R-07".to_string())),
        outletcode: Set("OUT-1207".to_string()),
        contact_no: Set(Some("01700000000".to_string())),
        lat: Set(23.8103),
        lon: Set(90.4125),
        last_visited_at: Set(None),
        last_order_amount: Set(None),
        last_order_delivered: Set(None),
        last_order_id: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
    .expect("insert outlet")
}

/// A typical order-item line priced at 150 per unit.
pub fn order_item(
    material_id: Uuid,
    name: &str,
    qty: i32,
) -> fieldstock_api::services::orders::OrderItemInput {
    fieldstock_api::services::orders::OrderItemInput {
        id: material_id,
        name: name.to_string(),
        qty,
        unit_price: dec!(150),
        total_price: dec!(150) * rust_decimal::Decimal::from(qty),
        size: 12,
    }
}
