mod common;

use common::{rep, stock_item, test_services, town};
use fieldstock_api::services::{
    catalog::CreateMaterialRequest, town_stock::ReceiveTownStockRequest,
    transfer::AllocateStockRequest,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::test]
async fn user_stock_view_is_enriched_with_catalog_data() {
    let (_db, services) = test_services().await;
    let field_rep = rep();
    let town = town();

    let material = services
        .catalog
        .create(CreateMaterialRequest {
            owner: "trade-marketing".to_string(),
            category: "display".to_string(),
            company: "acme-foods".to_string(),
            name: "shelf-display-a4".to_string(),
            material_code: "SD-A4".to_string(),
            size: 12,
            unit_price: dec!(150),
            image: Some("https://cdn.example.com/sd-a4.png".to_string()),
        })
        .await
        .expect("create material");

    services
        .town_stock
        .receive(
            rep(),
            ReceiveTownStockRequest {
                town: town.clone(),
                material: vec![stock_item(material.id, "shelf-display-a4", 100)],
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
                material: vec![stock_item(material.id, "shelf-display-a4", 30)],
            },
        )
        .await
        .expect("allocate");

    let overview = services
        .user_stock
        .get_user_stock(field_rep.id)
        .await
        .expect("view");

    assert_eq!(overview.stock.len(), 1);
    let line = &overview.stock[0];
    assert_eq!(line.remaining, 30);
    assert_eq!(line.pending, 0);
    assert_eq!(line.unit_price, Some(dec!(150)));
    assert_eq!(line.size, Some(12));
    assert_eq!(
        line.image.as_deref(),
        Some("https://cdn.example.com/sd-a4.png")
    );
    assert_eq!(line.town_id, town.id);
    assert!(overview.return_items.is_empty());
    assert!(overview.hand_over_amount.is_none());
}

#[tokio::test]
async fn town_stock_by_user_lists_only_their_towns() {
    let (_db, services) = test_services().await;
    let field_rep = rep();
    let town_a = town();
    let town_b = town();
    let m1 = Uuid::new_v4();
    let m2 = Uuid::new_v4();

    for (town, material_id, name) in [
        (&town_a, m1, "shelf-display-a4"),
        (&town_b, m2, "hanging-mobile"),
    ] {
        services
            .town_stock
            .receive(
                rep(),
                ReceiveTownStockRequest {
                    town: (*town).clone(),
                    material: vec![stock_item(material_id, name, 50)],
                },
            )
            .await
            .expect("receive");
    }

    // The rep only ever draws from town A.
    services
        .transfer
        .allocate(
            field_rep.clone(),
            AllocateStockRequest {
                town: town_a.clone(),
                material: vec![stock_item(m1, "shelf-display-a4", 10)],
            },
        )
        .await
        .expect("allocate");

    let overviews = services
        .user_stock
        .get_town_stock_by_user(field_rep.id)
        .await
        .expect("view");

    assert_eq!(overviews.len(), 1);
    assert_eq!(overviews[0].town_id, town_a.id);
    assert_eq!(overviews[0].material.len(), 1);
    // The pool view shows what is left town-side after the draw.
    assert_eq!(overviews[0].material[0].remaining, 40);
}

#[tokio::test]
async fn empty_ledger_yields_an_empty_view() {
    let (_db, services) = test_services().await;
    let nobody = Uuid::new_v4();

    let overview = services
        .user_stock
        .get_user_stock(nobody)
        .await
        .expect("view");

    assert!(overview.stock.is_empty());
    assert!(overview.return_items.is_empty());
    assert!(overview.hand_over_amount.is_none());
}
