mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use common::{order_item, rep, seed_outlet, stock_item, test_services, town, user_remaining};
use fieldstock_api::{
    entities::{outlet, sales_order::Entity as SalesOrder},
    errors::ServiceError,
    services::{
        orders::{CreateSalesOrderRequest, OrderItemInput, OutletSnapshot},
        town_stock::ReceiveTownStockRequest,
        transfer::AllocateStockRequest,
        TownRef,
    },
};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use uuid::Uuid;

fn snapshot(outlet: &outlet::Model) -> OutletSnapshot {
    OutletSnapshot {
        id: outlet.id,
        name: outlet.name.clone(),
        channel: outlet.channel.clone(),
        route: outlet.route.clone(),
        routecode: outlet.routecode.clone(),
        outletcode: outlet.outletcode.clone(),
        contact_no: outlet.contact_no.clone(),
        lat: outlet.lat,
        lon: outlet.lon,
    }
}

fn sale_request(
    outlet: &outlet::Model,
    town: &TownRef,
    order_items: Vec<OrderItemInput>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> CreateSalesOrderRequest {
    let total: Decimal = order_items.iter().map(|i| i.total_price).sum();
    CreateSalesOrderRequest {
        outlet: snapshot(outlet),
        town: town.clone(),
        execution_start_at: Utc::now() - Duration::minutes(12),
        execution_end_at: Utc::now(),
        duration: "00:12:00".to_string(),
        order_items,
        exchange_items: Vec::new(),
        return_items: Vec::new(),
        total_ordered_amount: total,
        discount: Decimal::ZERO,
        delivery_type: Some("instant".to_string()),
        delivery_date: None,
        payment_method: Some("cash".to_string()),
        exchange_remarks: None,
        return_remarks: None,
        lat,
        lon,
    }
}

/// Seeds a pool with 100 units of one material and allocates 30 to the rep.
async fn seeded_rep_stock(
    services: &fieldstock_api::services::AppServices,
    town: &TownRef,
    material_id: Uuid,
    rep: &fieldstock_api::services::RepIdentity,
) {
    services
        .town_stock
        .receive(
            common::rep(),
            ReceiveTownStockRequest {
                town: town.clone(),
                material: vec![stock_item(material_id, "shelf-display-a4", 100)],
            },
        )
        .await
        .expect("receive");
    services
        .transfer
        .allocate(
            rep.clone(),
            AllocateStockRequest {
                town: town.clone(),
                material: vec![stock_item(material_id, "shelf-display-a4", 30)],
            },
        )
        .await
        .expect("allocate");
}

#[tokio::test]
async fn recording_a_sale_debits_rep_stock_and_updates_the_outlet() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded_rep_stock(&services, &town, m1, &field_rep).await;
    let outlet_row = seed_outlet(&db).await;

    let response = services
        .orders
        .record_sale(
            field_rep.clone(),
            sale_request(
                &outlet_row,
                &town,
                vec![order_item(m1, "shelf-display-a4", 5)],
                None,
                None,
            ),
        )
        .await
        .expect("record sale");

    assert_eq!(
        user_remaining(&db, town.id, field_rep.id, m1).await,
        Some(25)
    );
    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].qty, 5);
    assert_eq!(response.order.user_id, field_rep.id);

    let updated = outlet::Entity::find_by_id(outlet_row.id)
        .one(&*db)
        .await
        .expect("query outlet")
        .expect("outlet row");
    assert_eq!(updated.last_order_id, Some(response.order.id));
    assert_eq!(updated.last_order_delivered, Some(false));
    assert!(updated.last_visited_at.is_some());
    assert_eq!(
        updated.last_order_amount,
        Some(response.order.total_ordered_amount)
    );
}

#[tokio::test]
async fn a_short_item_aborts_the_whole_sale() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded_rep_stock(&services, &town, m1, &field_rep).await;
    let outlet_row = seed_outlet(&db).await;

    let err = services
        .orders
        .record_sale(
            field_rep.clone(),
            sale_request(
                &outlet_row,
                &town,
                vec![order_item(m1, "shelf-display-a4", 50)],
                None,
                None,
            ),
        )
        .await
        .expect_err("only 30 on hand");

    assert_matches!(err, ServiceError::InsufficientStock(name) if name == "shelf-display-a4");

    // No order row, no debit, no outlet stamp.
    let orders = SalesOrder::find().all(&*db).await.expect("query orders");
    assert!(orders.is_empty());
    assert_eq!(
        user_remaining(&db, town.id, field_rep.id, m1).await,
        Some(30)
    );
    let untouched = outlet::Entity::find_by_id(outlet_row.id)
        .one(&*db)
        .await
        .expect("query outlet")
        .expect("outlet row");
    assert!(untouched.last_order_id.is_none());
    assert!(untouched.last_visited_at.is_none());
}

#[tokio::test]
async fn a_sale_needs_a_stock_assignment() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    let outlet_row = seed_outlet(&db).await;

    let err = services
        .orders
        .record_sale(
            field_rep,
            sale_request(
                &outlet_row,
                &town,
                vec![order_item(m1, "shelf-display-a4", 1)],
                None,
                None,
            ),
        )
        .await
        .expect_err("rep never drew stock");

    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn geofence_annotates_but_never_blocks() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded_rep_stock(&services, &town, m1, &field_rep).await;
    let outlet_row = seed_outlet(&db).await;

    // Submitted from ~1.5 km north of the outlet.
    let response = services
        .orders
        .record_sale(
            field_rep,
            sale_request(
                &outlet_row,
                &town,
                vec![order_item(m1, "shelf-display-a4", 1)],
                Some(outlet_row.lat + 0.0135),
                Some(outlet_row.lon),
            ),
        )
        .await
        .expect("far away but still recorded");

    assert_eq!(response.order.within_radius, Some(false));
    let distance = response.order.distance.expect("distance annotated");
    assert!(distance > 1000.0, "got {}", distance);
}

#[tokio::test]
async fn nearby_submission_is_within_radius() {
    let (db, services) = test_services().await;
    let field_rep = rep();
    let town = town();
    let m1 = Uuid::new_v4();
    seeded_rep_stock(&services, &town, m1, &field_rep).await;
    let outlet_row = seed_outlet(&db).await;

    let response = services
        .orders
        .record_sale(
            field_rep,
            sale_request(
                &outlet_row,
                &town,
                vec![order_item(m1, "shelf-display-a4", 1)],
                Some(outlet_row.lat),
                Some(outlet_row.lon),
            ),
        )
        .await
        .expect("record sale");

    assert_eq!(response.order.within_radius, Some(true));
    assert_eq!(response.order.distance, Some(0.0));
}
