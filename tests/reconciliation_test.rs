mod common;

use assert_matches::assert_matches;
use common::{punch_in, rep, stock_item, test_services, town, town_remaining, user_remaining};
use fieldstock_api::{
    entities::{
        attendance::Entity as Attendance,
        stock_movement::{self, Entity as StockMovement, MovementKind},
    },
    errors::ServiceError,
    services::{
        reconciliation::{SettleItemInput, SettleStockRequest},
        town_stock::ReceiveTownStockRequest,
        transfer::AllocateStockRequest,
        AppServices, RepIdentity, TownRef,
    },
};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

fn settle_item(id: Uuid, name: &str, ret: i32, lost: i32, damage: i32) -> SettleItemInput {
    SettleItemInput {
        id,
        name: name.to_string(),
        company: Some("acme-foods".to_string()),
        return_qty: ret,
        lost_qty: lost,
        damage_qty: damage,
    }
}

/// Pool at 100, rep holding 30: the setup shared by every settlement test.
async fn seeded(services: &AppServices, town: &TownRef, m1: Uuid, field_rep: &RepIdentity) {
    services
        .town_stock
        .receive(
            rep(),
            ReceiveTownStockRequest {
                town: town.clone(),
                material: vec![stock_item(m1, "shelf-display-a4", 100)],
            },
        )
        .await
        .expect("receive");
    services
        .transfer
        .allocate(
            field_rep.clone(),
            AllocateStockRequest {
                town: town.clone(),
                material: vec![stock_item(m1, "shelf-display-a4", 30)],
            },
        )
        .await
        .expect("allocate");
}

#[tokio::test]
async fn settle_credits_town_with_returns_only() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded(&services, &town, m1, &field_rep).await;
    punch_in(&db, &field_rep, town.id).await;

    // Rep gives back 10, lost 5; town is credited only the 10.
    let outcome = services
        .reconciliation
        .settle(
            field_rep.clone(),
            SettleStockRequest {
                town: town.clone(),
                items: vec![settle_item(m1, "shelf-display-a4", 10, 5, 0)],
                hand_over_amount: None,
            },
        )
        .await
        .expect("settle");

    assert!(!outcome.message.is_empty());
    assert_eq!(
        user_remaining(&db, town.id, field_rep.id, m1).await,
        Some(15)
    );
    assert_eq!(town_remaining(&db, town.id, m1).await, 80);
}

#[tokio::test]
async fn settle_without_attendance_is_rejected_before_touching_stock() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded(&services, &town, m1, &field_rep).await;

    let err = services
        .reconciliation
        .settle(
            field_rep.clone(),
            SettleStockRequest {
                town: town.clone(),
                items: vec![settle_item(m1, "shelf-display-a4", 10, 0, 0)],
                hand_over_amount: None,
            },
        )
        .await
        .expect_err("no punch-in today");

    assert_matches!(err, ServiceError::PreconditionFailed(_));
    assert_eq!(
        user_remaining(&db, town.id, field_rep.id, m1).await,
        Some(30)
    );
    assert_eq!(town_remaining(&db, town.id, m1).await, 70);
}

#[tokio::test]
async fn settle_rejects_an_overdrawn_line() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded(&services, &town, m1, &field_rep).await;
    punch_in(&db, &field_rep, town.id).await;

    // 20 + 10 + 5 = 35 > 30 held.
    let err = services
        .reconciliation
        .settle(
            field_rep.clone(),
            SettleStockRequest {
                town: town.clone(),
                items: vec![settle_item(m1, "shelf-display-a4", 20, 10, 5)],
                hand_over_amount: None,
            },
        )
        .await
        .expect_err("over the held balance");

    assert_matches!(err, ServiceError::InsufficientStock(name) if name == "shelf-display-a4");
    assert_eq!(
        user_remaining(&db, town.id, field_rep.id, m1).await,
        Some(30)
    );
    assert_eq!(town_remaining(&db, town.id, m1).await, 70);
}

#[tokio::test]
async fn handover_lands_on_the_days_attendance_entry() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded(&services, &town, m1, &field_rep).await;
    let attendance_id = punch_in(&db, &field_rep, town.id).await;

    services
        .reconciliation
        .settle(
            field_rep.clone(),
            SettleStockRequest {
                town: town.clone(),
                items: vec![settle_item(m1, "shelf-display-a4", 5, 0, 0)],
                hand_over_amount: Some(dec!(10000)),
            },
        )
        .await
        .expect("settle");

    let entry = Attendance::find_by_id(attendance_id)
        .one(&*db)
        .await
        .expect("query attendance")
        .expect("attendance row");
    assert_eq!(entry.hand_over_amount, Some(dec!(10000)));
}

#[tokio::test]
async fn journal_keeps_the_lost_vs_damage_split() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded(&services, &town, m1, &field_rep).await;
    punch_in(&db, &field_rep, town.id).await;

    services
        .reconciliation
        .settle(
            field_rep.clone(),
            SettleStockRequest {
                town: town.clone(),
                items: vec![settle_item(m1, "shelf-display-a4", 10, 2, 3)],
                hand_over_amount: None,
            },
        )
        .await
        .expect("settle");

    // Balance collapsed all three into one 15-unit debit, but the journal
    // still knows which units were lost and which damaged.
    for (kind, qty) in [
        (MovementKind::Return, 10),
        (MovementKind::Lost, 2),
        (MovementKind::Damage, 3),
    ] {
        let rows = StockMovement::find()
            .filter(stock_movement::Column::MaterialId.eq(m1))
            .filter(stock_movement::Column::Kind.eq(kind.as_ref()))
            .all(&*db)
            .await
            .expect("query journal");
        assert_eq!(rows.len(), 1, "one {} row expected", kind.as_ref());
        assert_eq!(rows[0].qty, qty);
    }

    assert_eq!(
        user_remaining(&db, town.id, field_rep.id, m1).await,
        Some(15)
    );
    // Lost and damaged units are credited nowhere.
    assert_eq!(town_remaining(&db, town.id, m1).await, 80);
}

#[tokio::test]
async fn a_settlement_line_moving_nothing_is_invalid() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded(&services, &town, m1, &field_rep).await;
    punch_in(&db, &field_rep, town.id).await;

    let err = services
        .reconciliation
        .settle(
            field_rep,
            SettleStockRequest {
                town,
                items: vec![settle_item(m1, "shelf-display-a4", 0, 0, 0)],
                hand_over_amount: None,
            },
        )
        .await
        .expect_err("empty line");

    assert_matches!(err, ServiceError::InvalidInput(_));
}
