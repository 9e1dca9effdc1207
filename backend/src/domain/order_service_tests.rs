//! Tests for the order service.

use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::domain::order::{OrderLine, OrderLineDetail, OrderLineSubmission};
use crate::domain::ports::{MockOrderRepository, MockProductRepository};
use crate::domain::{ErrorCode, Role};

fn service(
    orders: MockOrderRepository,
    products: MockProductRepository,
) -> OrderService<MockOrderRepository, MockProductRepository> {
    OrderService::new(Arc::new(orders), Arc::new(products))
}

fn guest() -> Principal {
    Principal::guest()
}

fn known_product(id: Uuid) -> crate::domain::catalog::Product {
    crate::domain::catalog::Product {
        id,
        name: "Hammer".to_owned(),
        description: None,
        price: BigDecimal::from_str("9.99").expect("price"),
        quantity: 10,
        category_id: Uuid::new_v4(),
        image_url: "/images/hammer.png".to_owned(),
        is_active: true,
        created_at: Utc::now(),
        created_by: "alice".to_owned(),
        updated_at: None,
        updated_by: None,
    }
}

fn submission(product_id: Uuid, quantity: i32, unit_price: &str) -> OrderLineSubmission {
    OrderLineSubmission {
        product_id,
        quantity,
        unit_price: BigDecimal::from_str(unit_price).expect("price"),
    }
}

fn request(lines: Vec<OrderLineSubmission>) -> PlaceOrderRequest {
    PlaceOrderRequest {
        guest_name: "Guest".to_owned(),
        guest_email: "guest@example.com".to_owned(),
        lines,
    }
}

#[tokio::test]
async fn place_order_computes_total_from_line_subtotals() {
    let product_id = Uuid::new_v4();
    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(known_product(id))));
    let mut orders = MockOrderRepository::new();
    orders
        .expect_create()
        .withf(|order, lines| {
            lines.len() == 2
                && order.total_amount == BigDecimal::from_str("23.73").expect("total")
        })
        .times(1)
        .returning(|_, _| Ok(()));
    let svc = service(orders, products);

    let placed = svc
        .place_order(
            &guest(),
            request(vec![
                submission(product_id, 2, "9.99"),
                submission(Uuid::new_v4(), 3, "1.25"),
            ]),
        )
        .await
        .expect("order placed");
    assert_eq!(
        placed.order.total_amount,
        BigDecimal::from_str("23.73").expect("total")
    );
    assert_eq!(placed.lines.len(), 2);
}

#[tokio::test]
async fn place_order_skips_lines_for_unknown_products() {
    let known = Uuid::new_v4();
    let unknown = Uuid::new_v4();
    let mut products = MockProductRepository::new();
    products.expect_find_by_id().returning(move |id| {
        if id == known {
            Ok(Some(known_product(id)))
        } else {
            Ok(None)
        }
    });
    let mut orders = MockOrderRepository::new();
    orders
        .expect_create()
        .withf(move |order, lines| {
            lines.len() == 1
                && lines.iter().all(|line| line.product_id == known)
                && order.total_amount == BigDecimal::from_str("19.98").expect("total")
        })
        .times(1)
        .returning(|_, _| Ok(()));
    let svc = service(orders, products);

    let placed = svc
        .place_order(
            &guest(),
            request(vec![
                submission(known, 2, "9.99"),
                submission(unknown, 5, "100.00"),
            ]),
        )
        .await
        .expect("order placed");
    assert_eq!(placed.lines.len(), 1);
    assert_eq!(
        placed.order.total_amount,
        BigDecimal::from_str("19.98").expect("total")
    );
}

#[tokio::test]
async fn place_order_rejects_malformed_email_without_persisting() {
    let mut orders = MockOrderRepository::new();
    orders.expect_create().times(0);
    let svc = service(orders, MockProductRepository::new());

    let mut bad = request(vec![]);
    bad.guest_email = "not-an-email".to_owned();
    let err = svc
        .place_order(&guest(), bad)
        .await
        .expect_err("validation failure");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({ "field": "guestEmail" }))
    );
}

#[tokio::test]
async fn place_order_rejects_zero_quantity_line() {
    let mut orders = MockOrderRepository::new();
    orders.expect_create().times(0);
    let svc = service(orders, MockProductRepository::new());

    let err = svc
        .place_order(&guest(), request(vec![submission(Uuid::new_v4(), 0, "1.00")]))
        .await
        .expect_err("validation failure");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn place_order_is_open_to_authenticated_principals_too() {
    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(known_product(id))));
    let mut orders = MockOrderRepository::new();
    orders.expect_create().times(1).returning(|_, _| Ok(()));
    let svc = service(orders, products);

    let principal = Principal::authenticated("alice", [Role::Admin]);
    svc.place_order(&principal, request(vec![submission(Uuid::new_v4(), 1, "1.00")]))
        .await
        .expect("order placed");
}

#[tokio::test]
async fn get_order_returns_materialized_aggregate() {
    let order_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let mut orders = MockOrderRepository::new();
    orders.expect_find_with_lines().returning(move |id| {
        let (order, lines) = Order::assemble(
            "Guest".to_owned(),
            "guest@example.com".to_owned(),
            Utc::now(),
            vec![submission(product_id, 2, "9.99")],
        );
        let mut order = order;
        order.id = id;
        Ok(Some(OrderAggregate {
            order,
            lines: lines
                .into_iter()
                .map(|line| OrderLineDetail {
                    line: OrderLine { order_id: id, ..line },
                    product_name: Some("Hammer".to_owned()),
                })
                .collect(),
        }))
    });
    let svc = service(orders, MockProductRepository::new());

    let aggregate = svc.get_order(&guest(), order_id).await.expect("found");
    assert_eq!(aggregate.order.id, order_id);
    assert_eq!(aggregate.lines.len(), 1);
    assert_eq!(
        aggregate.lines.first().and_then(|l| l.product_name.as_deref()),
        Some("Hammer")
    );
}

#[tokio::test]
async fn get_order_reports_not_found() {
    let mut orders = MockOrderRepository::new();
    orders.expect_find_with_lines().returning(|_| Ok(None));
    let svc = service(orders, MockProductRepository::new());

    let err = svc
        .get_order(&guest(), Uuid::new_v4())
        .await
        .expect_err("missing order");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_order_is_a_no_op_when_absent() {
    let mut orders = MockOrderRepository::new();
    orders.expect_delete().times(2).returning(|_| Ok(()));
    let svc = service(orders, MockProductRepository::new());

    let id = Uuid::new_v4();
    svc.delete_order(&guest(), id).await.expect("first delete");
    svc.delete_order(&guest(), id)
        .await
        .expect("repeat delete succeeds");
}

#[tokio::test]
async fn repository_failures_are_mapped_to_internal_errors() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_list_with_lines()
        .returning(|| Err(OrderRepositoryError::query("relation missing")));
    let svc = service(orders, MockProductRepository::new());

    let err = svc.list_orders(&guest()).await.expect_err("query failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
