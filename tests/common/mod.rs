//! Shared test harness: a fully wired coordinator over temp storage.

#![allow(dead_code)]

use std::sync::Arc;

use fresh_checkout::db::models::{Address, ProductSku};
use fresh_checkout::db::repository::{AddressRepository, OrderRepository, ProductRepository};
use fresh_checkout::{
    CartStore, CheckoutCoordinator, DbService, LoggingGateway, SqlStockLedger,
};
use tempfile::TempDir;

pub const SHIPPING_FEE_CENTS: i64 = 1000;

pub struct Harness {
    // Kept alive for the duration of the test
    pub dir: TempDir,
    pub db: DbService,
    pub cart: CartStore,
    pub coordinator: Arc<CheckoutCoordinator>,
}

impl Harness {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("checkout.db");
        let db = DbService::new(db_path.to_str().unwrap()).await.unwrap();
        let cart = CartStore::open(dir.path().join("cart.redb")).unwrap();

        let coordinator = Arc::new(CheckoutCoordinator::new(
            db.clone(),
            cart.clone(),
            Arc::new(SqlStockLedger),
            Arc::new(LoggingGateway),
            SHIPPING_FEE_CENTS,
        ));

        Self {
            dir,
            db,
            cart,
            coordinator,
        }
    }

    pub async fn seed_sku(&self, id: i64, price_cents: i64, stock: i64) {
        let mut conn = self.db.write_pool.acquire().await.unwrap();
        ProductRepository::insert(
            &mut conn,
            &ProductSku {
                id,
                name: format!("sku-{id}"),
                unit: "500g".into(),
                price_cents,
                stock,
                sales: 0,
            },
        )
        .await
        .unwrap();
    }

    pub async fn seed_address(&self, id: i64, user_id: i64) {
        let mut conn = self.db.write_pool.acquire().await.unwrap();
        AddressRepository::insert(
            &mut conn,
            &Address {
                id,
                user_id,
                receiver: "buyer".into(),
                detail: "1 Fresh Street".into(),
                zip_code: "100000".into(),
                phone: "".into(),
            },
        )
        .await
        .unwrap();
    }

    pub async fn sku(&self, id: i64) -> ProductSku {
        let mut conn = self.db.read_pool.acquire().await.unwrap();
        ProductRepository::find_by_id(&mut conn, id)
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn order_count(&self) -> i64 {
        let mut conn = self.db.read_pool.acquire().await.unwrap();
        OrderRepository::count_orders(&mut conn).await.unwrap()
    }

    pub async fn line_count(&self) -> i64 {
        let mut conn = self.db.read_pool.acquire().await.unwrap();
        OrderRepository::count_lines(&mut conn).await.unwrap()
    }
}
