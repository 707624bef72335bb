//! Order Repository
//!
//! Writes go through the commit coordinator's transaction; the read side is
//! used by tests and the (external) order history pages.

use super::RepoResult;
use crate::db::models::{OrderInfo, OrderLine};
use sqlx::SqliteConnection;

pub struct OrderRepository;

impl OrderRepository {
    /// Insert the order header. Called with zero totals; totals are written
    /// once by [`OrderRepository::write_totals`] after every line succeeded.
    pub async fn insert_header(conn: &mut SqliteConnection, order: &OrderInfo) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO order_info
                (order_id, user_id, addr_id, pay_method, total_count,
                 total_price_cents, shipping_fee_cents, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&order.order_id)
        .bind(order.user_id)
        .bind(order.addr_id)
        .bind(order.pay_method)
        .bind(order.total_count)
        .bind(order.total_price_cents)
        .bind(order.shipping_fee_cents)
        .bind(order.status)
        .bind(order.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Append one order line.
    pub async fn insert_line(
        conn: &mut SqliteConnection,
        order_id: &str,
        sku_id: i64,
        count: i64,
        price_cents: i64,
    ) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO order_goods (order_id, sku_id, count, price_cents)
             VALUES (?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(sku_id)
        .bind(count)
        .bind(price_cents)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Write the aggregated totals onto the header.
    pub async fn write_totals(
        conn: &mut SqliteConnection,
        order_id: &str,
        total_count: i64,
        total_price_cents: i64,
    ) -> RepoResult<()> {
        sqlx::query(
            "UPDATE order_info SET total_count = ?, total_price_cents = ? WHERE order_id = ?",
        )
        .bind(total_count)
        .bind(total_price_cents)
        .bind(order_id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch an order header.
    pub async fn find_header(
        conn: &mut SqliteConnection,
        order_id: &str,
    ) -> RepoResult<Option<OrderInfo>> {
        let order = sqlx::query_as::<_, OrderInfo>(
            "SELECT order_id, user_id, addr_id, pay_method, total_count,
                    total_price_cents, shipping_fee_cents, status, created_at
             FROM order_info WHERE order_id = ?",
        )
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(order)
    }

    /// Fetch the lines of an order, in insertion order.
    pub async fn lines_of(
        conn: &mut SqliteConnection,
        order_id: &str,
    ) -> RepoResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            "SELECT id, order_id, sku_id, count, price_cents
             FROM order_goods WHERE order_id = ? ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(lines)
    }

    /// Count persisted orders (used by rollback assertions in tests).
    pub async fn count_orders(conn: &mut SqliteConnection) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_info")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }

    /// Count persisted order lines.
    pub async fn count_lines(conn: &mut SqliteConnection) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_goods")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }
}
