mod common;

use assert_matches::assert_matches;
use common::{rep, stock_item, test_services, town, town_remaining, user_remaining};
use fieldstock_api::{
    entities::stock_movement::{self, Entity as StockMovement, MovementKind},
    errors::ServiceError,
    services::{town_stock::ReceiveTownStockRequest, transfer::AllocateStockRequest},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

#[tokio::test]
async fn allocate_moves_quantity_between_ledgers() {
    let (db, services) = test_services().await;
    let admin = rep();
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();

    services
        .town_stock
        .receive(
            admin,
            ReceiveTownStockRequest {
                town: town.clone(),
                material: vec![stock_item(m1, "shelf-display-a4", 100)],
            },
        )
        .await
        .expect("receive");

    let summary = services
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

    assert_eq!(summary.town_modified_count, 1);
    assert_eq!(summary.user_modified_count, 1);
    assert_eq!(town_remaining(&db, town.id, m1).await, 70);
    assert_eq!(
        user_remaining(&db, town.id, field_rep.id, m1).await,
        Some(30)
    );
}

#[tokio::test]
async fn allocate_rejects_insufficient_stock_and_leaves_balances_untouched() {
    let (db, services) = test_services().await;
    let admin = rep();
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();

    services
        .town_stock
        .receive(
            admin,
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
        .expect("first allocate");

    // 80 > 70 remaining.
    let err = services
        .transfer
        .allocate(
            field_rep.clone(),
            AllocateStockRequest {
                town: town.clone(),
                material: vec![stock_item(m1, "shelf-display-a4", 80)],
            },
        )
        .await
        .expect_err("should be short");

    assert_matches!(err, ServiceError::InsufficientStock(name) if name == "shelf-display-a4");
    assert_eq!(town_remaining(&db, town.id, m1).await, 70);
    assert_eq!(
        user_remaining(&db, town.id, field_rep.id, m1).await,
        Some(30)
    );
}

#[tokio::test]
async fn allocation_is_all_or_nothing() {
    let (db, services) = test_services().await;
    let admin = rep();
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    let m2 = Uuid::new_v4();

    // Pool only ever held m1.
    services
        .town_stock
        .receive(
            admin,
            ReceiveTownStockRequest {
                town: town.clone(),
                material: vec![stock_item(m1, "shelf-display-a4", 100)],
            },
        )
        .await
        .expect("receive");

    let err = services
        .transfer
        .allocate(
            field_rep.clone(),
            AllocateStockRequest {
                town: town.clone(),
                material: vec![
                    stock_item(m1, "shelf-display-a4", 10),
                    stock_item(m2, "hanging-mobile", 5),
                ],
            },
        )
        .await
        .expect_err("second line must fail");

    assert_matches!(err, ServiceError::InsufficientStock(name) if name == "hanging-mobile");
    // The m1 debit from the same batch must have been rolled back.
    assert_eq!(town_remaining(&db, town.id, m1).await, 100);
    assert_eq!(user_remaining(&db, town.id, field_rep.id, m1).await, None);
}

#[tokio::test]
async fn allocate_requires_an_existing_town_pool() {
    let (_db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();

    let err = services
        .transfer
        .allocate(
            field_rep,
            AllocateStockRequest {
                town,
                material: vec![stock_item(m1, "shelf-display-a4", 1)],
            },
        )
        .await
        .expect_err("no pool exists");

    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn replaying_an_identical_allocation_double_applies() {
    // Documented non-guarantee: there is no idempotency key, so a retried
    // call after an ambiguous failure applies again.
    let (db, services) = test_services().await;
    let admin = rep();
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();

    services
        .town_stock
        .receive(
            admin,
            ReceiveTownStockRequest {
                town: town.clone(),
                material: vec![stock_item(m1, "shelf-display-a4", 100)],
            },
        )
        .await
        .expect("receive");

    let request = AllocateStockRequest {
        town: town.clone(),
        material: vec![stock_item(m1, "shelf-display-a4", 30)],
    };
    services
        .transfer
        .allocate(field_rep.clone(), request.clone())
        .await
        .expect("first");
    services
        .transfer
        .allocate(field_rep.clone(), request)
        .await
        .expect("replay");

    assert_eq!(town_remaining(&db, town.id, m1).await, 40);
    assert_eq!(
        user_remaining(&db, town.id, field_rep.id, m1).await,
        Some(60)
    );
}

#[tokio::test]
async fn every_allocation_is_journaled() {
    let (db, services) = test_services().await;
    let admin = rep();
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();

    services
        .town_stock
        .receive(
            admin,
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

    let movements = StockMovement::find()
        .filter(stock_movement::Column::MaterialId.eq(m1))
        .filter(stock_movement::Column::Kind.eq(MovementKind::Allocate.as_ref()))
        .all(&*db)
        .await
        .expect("query journal");

    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].qty, 30);
    assert_eq!(movements[0].from_id, Some(town.id));
    assert_eq!(movements[0].to_id, Some(field_rep.id));
}
