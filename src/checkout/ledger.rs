//! Inventory ledger — exclusive owner of stock/sales mutation
//!
//! The decrement is optimistic: read the counters, then update them with a
//! `WHERE stock = <observed>` guard. If another commit moved stock between
//! the read and the write, the guard matches zero rows and the caller gets
//! [`DecrementOutcome::Conflict`] — a retry signal, not an error. This keeps
//! concurrent buyers off a global lock: different SKUs proceed fully in
//! parallel and the same SKU is serialized by the storage layer's atomic
//! conditional update.

use crate::db::repository::{RepoError, RepoResult};
use async_trait::async_trait;
use sqlx::SqliteConnection;

/// Result of one conditional decrement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Stock and sales were durably updated (within the caller's transaction).
    Applied {
        new_stock: i64,
        new_sales: i64,
        /// Unit price observed by this attempt — the price the order line
        /// must capture.
        unit_price_cents: i64,
    },
    /// The requested quantity exceeds current stock. Not retriable: stock
    /// was truly insufficient as observed.
    Insufficient { available: i64 },
    /// A concurrent commit changed stock between our read and write.
    /// Retriable: re-read and try again.
    Conflict,
}

/// The conditional-decrement primitive, behind a trait so the coordinator's
/// retry loop can be exercised with a conflict-injecting double.
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Attempt to decrement `quantity` from the SKU's stock (and add it to
    /// sales) inside the caller's transaction.
    async fn try_decrement(
        &self,
        conn: &mut SqliteConnection,
        sku_id: i64,
        quantity: i64,
    ) -> RepoResult<DecrementOutcome>;
}

/// Ledger over the `product_sku` table.
pub struct SqlStockLedger;

#[async_trait]
impl StockLedger for SqlStockLedger {
    async fn try_decrement(
        &self,
        conn: &mut SqliteConnection,
        sku_id: i64,
        quantity: i64,
    ) -> RepoResult<DecrementOutcome> {
        let row: Option<(i64, i64, i64)> = sqlx::query_as(
            "SELECT stock, sales, price_cents FROM product_sku WHERE id = ?",
        )
        .bind(sku_id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some((stock, sales, price_cents)) = row else {
            return Err(RepoError::NotFound(format!("product_sku {sku_id}")));
        };

        if quantity > stock {
            return Ok(DecrementOutcome::Insufficient { available: stock });
        }

        // Compare-and-swap on the observed stock value. rows_affected == 0
        // means somebody else won the race.
        let affected = sqlx::query(
            "UPDATE product_sku SET stock = stock - ?1, sales = sales + ?1
             WHERE id = ?2 AND stock = ?3",
        )
        .bind(quantity)
        .bind(sku_id)
        .bind(stock)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        if affected == 0 {
            return Ok(DecrementOutcome::Conflict);
        }

        Ok(DecrementOutcome::Applied {
            new_stock: stock - quantity,
            new_sales: sales + quantity,
            unit_price_cents: price_cents,
        })
    }
}
