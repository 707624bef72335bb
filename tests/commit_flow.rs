//! End-to-end commit scenarios: happy path, aborts with full rollback, and
//! the HTTP envelope.

mod common;

use chrono::{Duration, Local};
use common::{Harness, SHIPPING_FEE_CENTS};
use fresh_checkout::db::models::{OrderInfo, OrderStatus};
use fresh_checkout::db::repository::OrderRepository;
use fresh_checkout::{CheckoutError, CommitRequest};

fn request(user_id: i64, sku_ids: Vec<i64>) -> CommitRequest {
    CommitRequest {
        user_id,
        addr_id: Some(user_id),
        pay_method: Some(1),
        sku_ids,
    }
}

#[tokio::test]
async fn single_line_commit_drains_stock() {
    let h = Harness::new().await;
    h.seed_sku(100, 1250, 5).await;
    h.seed_address(42, 42).await;
    h.cart.set_quantity(42, 100, 5).unwrap();

    let receipt = h.coordinator.commit(request(42, vec![100])).await.unwrap();

    assert_eq!(receipt.total_count, 5);
    assert_eq!(receipt.total_price_cents, 5 * 1250);
    assert_eq!(receipt.amount_due_cents, 5 * 1250 + SHIPPING_FEE_CENTS);

    let sku = h.sku(100).await;
    assert_eq!(sku.stock, 0);
    assert_eq!(sku.sales, 5);

    let mut conn = h.db.read_pool.acquire().await.unwrap();
    let header = OrderRepository::find_header(&mut conn, &receipt.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(header.total_count, 5);
    assert_eq!(header.total_price_cents, 5 * 1250);
    assert_eq!(header.status, OrderStatus::UnpaidPending.code());
    assert_eq!(header.shipping_fee_cents, SHIPPING_FEE_CENTS);

    let lines = OrderRepository::lines_of(&mut conn, &receipt.order_id)
        .await
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].sku_id, 100);
    assert_eq!(lines[0].count, 5);
    assert_eq!(lines[0].price_cents, 1250);

    // Committed lines are gone from the cart
    assert_eq!(h.cart.quantity_of(42, 100).unwrap(), None);
}

#[tokio::test]
async fn totals_equal_sum_of_lines() {
    let h = Harness::new().await;
    h.seed_sku(100, 350, 10).await;
    h.seed_sku(200, 1299, 10).await;
    h.seed_sku(300, 80, 10).await;
    h.seed_address(7, 7).await;
    h.cart.set_quantity(7, 100, 2).unwrap();
    h.cart.set_quantity(7, 200, 1).unwrap();
    h.cart.set_quantity(7, 300, 4).unwrap();

    let receipt = h
        .coordinator
        .commit(request(7, vec![100, 200, 300]))
        .await
        .unwrap();

    let mut conn = h.db.read_pool.acquire().await.unwrap();
    let lines = OrderRepository::lines_of(&mut conn, &receipt.order_id)
        .await
        .unwrap();

    // Lines in caller-supplied order
    assert_eq!(
        lines.iter().map(|l| l.sku_id).collect::<Vec<_>>(),
        vec![100, 200, 300]
    );

    let sum_price: i64 = lines.iter().map(|l| l.count * l.price_cents).sum();
    let sum_count: i64 = lines.iter().map(|l| l.count).sum();
    assert_eq!(receipt.total_price_cents, sum_price);
    assert_eq!(receipt.total_count, sum_count);
    assert_eq!(sum_price, 2 * 350 + 1299 + 4 * 80);
}

#[tokio::test]
async fn out_of_stock_rolls_back_everything() {
    let h = Harness::new().await;
    h.seed_sku(100, 500, 3).await;
    h.seed_address(42, 42).await;
    h.cart.set_quantity(42, 100, 5).unwrap();

    let err = h
        .coordinator
        .commit(request(42, vec![100]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::OutOfStock {
            sku_id: 100,
            requested: 5,
            available: 3,
        }
    ));

    let sku = h.sku(100).await;
    assert_eq!(sku.stock, 3);
    assert_eq!(sku.sales, 0);
    assert_eq!(h.order_count().await, 0);
    assert_eq!(h.line_count().await, 0);
    // Aborted commit must not touch the cart either
    assert_eq!(h.cart.quantity_of(42, 100).unwrap(), Some(5));
}

#[tokio::test]
async fn abort_on_second_line_undoes_first_decrement() {
    let h = Harness::new().await;
    h.seed_sku(100, 500, 10).await;
    h.seed_sku(200, 900, 1).await;
    h.seed_address(42, 42).await;
    h.cart.set_quantity(42, 100, 2).unwrap();
    h.cart.set_quantity(42, 200, 5).unwrap();

    let err = h
        .coordinator
        .commit(request(42, vec![100, 200]))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::OutOfStock { sku_id: 200, .. }));

    // The first SKU's decrement was rolled back with the rest
    assert_eq!(h.sku(100).await.stock, 10);
    assert_eq!(h.sku(200).await.stock, 1);
    assert_eq!(h.order_count().await, 0);
    assert_eq!(h.line_count().await, 0);
}

#[tokio::test]
async fn missing_cart_line_aborts_whole_commit() {
    let h = Harness::new().await;
    h.seed_sku(100, 500, 10).await;
    h.seed_sku(200, 900, 10).await;
    h.seed_address(42, 42).await;
    // Only one of the two requested SKUs is in the cart
    h.cart.set_quantity(42, 100, 2).unwrap();

    let err = h
        .coordinator
        .commit(request(42, vec![100, 200]))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::ProductNotFound(200)));

    assert_eq!(h.sku(100).await.stock, 10);
    assert_eq!(h.order_count().await, 0);
}

#[tokio::test]
async fn unknown_sku_aborts_whole_commit() {
    let h = Harness::new().await;
    h.seed_address(42, 42).await;
    h.cart.set_quantity(42, 999, 1).unwrap();

    let err = h
        .coordinator
        .commit(request(42, vec![999]))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::ProductNotFound(999)));
    assert_eq!(h.order_count().await, 0);
}

#[tokio::test]
async fn duplicate_sku_ids_are_rejected_before_any_write() {
    let h = Harness::new().await;
    h.seed_sku(100, 500, 10).await;
    h.seed_address(42, 42).await;
    h.cart.set_quantity(42, 100, 2).unwrap();

    // One cart line must never be charged twice
    let err = h
        .coordinator
        .commit(request(42, vec![100, 100]))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::Validation(_)));

    let sku = h.sku(100).await;
    assert_eq!(sku.stock, 10);
    assert_eq!(sku.sales, 0);
    assert_eq!(h.order_count().await, 0);
    assert_eq!(h.line_count().await, 0);
    assert_eq!(h.cart.quantity_of(42, 100).unwrap(), Some(2));
}

#[tokio::test]
async fn same_second_recommit_gets_the_retriable_code() {
    let h = Harness::new().await;
    h.seed_sku(100, 500, 10).await;
    h.seed_address(42, 42).await;
    h.cart.set_quantity(42, 100, 2).unwrap();

    // Occupy every order id this user can generate over the next few
    // seconds, as a just-completed earlier commit would.
    let mut conn = h.db.write_pool.acquire().await.unwrap();
    for offset in 0..3 {
        let stamp = (Local::now() + Duration::seconds(offset)).format("%Y%m%d%H%M%S");
        OrderRepository::insert_header(
            &mut conn,
            &OrderInfo {
                order_id: format!("{stamp}42"),
                user_id: 42,
                addr_id: 42,
                pay_method: 1,
                total_count: 0,
                total_price_cents: 0,
                shipping_fee_cents: 0,
                status: OrderStatus::UnpaidPending.code(),
                created_at: 0,
            },
        )
        .await
        .unwrap();
    }
    drop(conn);

    let err = h
        .coordinator
        .commit(request(42, vec![100]))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::DuplicateOrder(_)));
    assert_eq!(err.code().as_str(), "COMMIT_FAILED");

    // The colliding attempt rolled back; only the pre-seeded headers remain
    assert_eq!(h.sku(100).await.stock, 10);
    assert_eq!(h.order_count().await, 3);
    assert_eq!(h.line_count().await, 0);
}

#[tokio::test]
async fn preview_totals_overflow_aborts_cleanly() {
    use fresh_checkout::checkout::preview;

    let h = Harness::new().await;
    h.seed_sku(100, 1, 1).await;
    h.seed_sku(200, 1, 1).await;
    h.cart.set_quantity(42, 100, i64::MAX).unwrap();
    h.cart.set_quantity(42, 200, i64::MAX).unwrap();

    // The second line pushes total_count past i64::MAX
    let err = preview::build(&h.db, &h.cart, 42, &[100, 200], SHIPPING_FEE_CENTS)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::CommitFailed { sku_id: 200 }));
}

#[tokio::test]
async fn line_price_is_captured_at_commit_time() {
    let h = Harness::new().await;
    h.seed_sku(100, 1250, 5).await;
    h.seed_address(42, 42).await;
    h.cart.set_quantity(42, 100, 1).unwrap();

    let receipt = h.coordinator.commit(request(42, vec![100])).await.unwrap();

    // Catalog price changes after the commit
    let mut conn = h.db.write_pool.acquire().await.unwrap();
    sqlx::query("UPDATE product_sku SET price_cents = 9999 WHERE id = 100")
        .execute(&mut *conn)
        .await
        .unwrap();

    let lines = OrderRepository::lines_of(&mut conn, &receipt.order_id)
        .await
        .unwrap();
    assert_eq!(lines[0].price_cents, 1250);
}

mod http {
    //! Envelope contract over the real router.

    use super::*;
    use axum::body::Body;
    use fresh_checkout::{api, AppState, Config};
    use ::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app(h: &Harness) -> axum::Router {
        let config = Config {
            work_dir: h.dir.path().to_string_lossy().into_owned(),
            http_port: 0,
            shipping_fee_cents: SHIPPING_FEE_CENTS,
            request_timeout_ms: 30_000,
            environment: "test".into(),
        };
        let state = AppState {
            config,
            db: h.db.clone(),
            cart: h.cart.clone(),
            checkout: h.coordinator.clone(),
        };
        api::router().with_state(state)
    }

    async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn commit_envelope_success_and_error_codes() {
        let h = Harness::new().await;
        h.seed_sku(100, 1250, 5).await;
        h.seed_address(42, 42).await;
        h.cart.set_quantity(42, 100, 2).unwrap();

        let app_router = app(&h).await;

        // Missing addr_id → 200 with a validation code in the envelope
        let (status, body) = post_json(
            app_router.clone(),
            "/api/orders/commit",
            json!({"user_id": 42, "pay_method": 1, "sku_ids": [100]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "VALIDATION");

        // Unrecognized pay method
        let (_, body) = post_json(
            app_router.clone(),
            "/api/orders/commit",
            json!({"user_id": 42, "addr_id": 42, "pay_method": 9, "sku_ids": [100]}),
        )
        .await;
        assert_eq!(body["code"], "INVALID_PAY_METHOD");

        // Success
        let (status, body) = post_json(
            app_router,
            "/api/orders/commit",
            json!({"user_id": 42, "addr_id": 42, "pay_method": 1, "sku_ids": [100]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "0000");
        assert_eq!(body["data"]["total_count"], 2);
        assert_eq!(body["data"]["total_price_cents"], 2500);
        assert!(body["data"]["order_id"].as_str().unwrap().ends_with("42"));
    }

    #[tokio::test]
    async fn preview_prices_cart_against_catalog() {
        let h = Harness::new().await;
        h.seed_sku(100, 350, 10).await;
        h.seed_sku(200, 1299, 10).await;
        h.seed_address(7, 7).await;
        h.cart.set_quantity(7, 100, 2).unwrap();
        h.cart.set_quantity(7, 200, 1).unwrap();

        let app_router = app(&h).await;
        let (status, body) = post_json(
            app_router,
            "/api/orders/preview",
            json!({"user_id": 7, "sku_ids": [100, 200]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "0000");
        assert_eq!(body["data"]["total_count"], 3);
        assert_eq!(body["data"]["total_price_cents"], 2 * 350 + 1299);
        assert_eq!(
            body["data"]["total_pay_cents"],
            2 * 350 + 1299 + SHIPPING_FEE_CENTS
        );
        assert_eq!(body["data"]["lines"][0]["amount_cents"], 700);

        // Preview reserves nothing
        assert_eq!(h.sku(100).await.stock, 10);
    }
}
