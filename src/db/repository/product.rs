//! Product Repository
//!
//! Plain reads and seeding for `product_sku`. Stock/sales mutations are NOT
//! here — they belong to the inventory ledger's conditional update
//! ([`crate::checkout::ledger`]).

use super::RepoResult;
use crate::db::models::ProductSku;
use sqlx::SqliteConnection;

pub struct ProductRepository;

impl ProductRepository {
    /// Fetch one SKU.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        sku_id: i64,
    ) -> RepoResult<Option<ProductSku>> {
        let sku = sqlx::query_as::<_, ProductSku>(
            "SELECT id, name, unit, price_cents, stock, sales FROM product_sku WHERE id = ?",
        )
        .bind(sku_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(sku)
    }

    /// Insert a SKU (catalog management is external; used by seeding and tests).
    pub async fn insert(conn: &mut SqliteConnection, sku: &ProductSku) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO product_sku (id, name, unit, price_cents, stock, sales)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(sku.id)
        .bind(&sku.name)
        .bind(&sku.unit)
        .bind(sku.price_cents)
        .bind(sku.stock)
        .bind(sku.sales)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
