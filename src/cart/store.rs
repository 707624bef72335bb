//! redb-based cart snapshot store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `cart_lines` | `(user_id, sku_id)` | quantity | Desired purchase quantity per user per SKU |
//!
//! The composite key makes "all lines of one user" a prefix range scan and
//! "delete these SKUs for this user" a handful of point removals in a single
//! write transaction.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Cart lines: key = (user_id, sku_id), value = desired quantity
const CART_TABLE: TableDefinition<(i64, i64), i64> = TableDefinition::new("cart_lines");

/// Cart store errors
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),
}

pub type CartResult<T> = Result<T, CartError>;

/// Cart snapshot store backed by redb
#[derive(Clone)]
pub struct CartStore {
    db: Arc<Database>,
}

impl CartStore {
    /// Open or create the cart database at the given path
    pub fn open(path: impl AsRef<Path>) -> CartResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CART_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory cart store (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> CartResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CART_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Desired quantity of one SKU for one user.
    ///
    /// `None` means the line is gone — if it vanished between the buyer's
    /// snapshot and commit, the commit coordinator treats that as fatal for
    /// the whole attempt.
    pub fn quantity_of(&self, user_id: i64, sku_id: i64) -> CartResult<Option<i64>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_TABLE)?;
        Ok(table.get((user_id, sku_id))?.map(|guard| guard.value()))
    }

    /// All cart lines of one user, ordered by SKU id.
    pub fn items_of(&self, user_id: i64) -> CartResult<Vec<(i64, i64)>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_TABLE)?;

        let mut items = Vec::new();
        for entry in table.range((user_id, i64::MIN)..=(user_id, i64::MAX))? {
            let (key, value) = entry?;
            let (_, sku_id) = key.value();
            items.push((sku_id, value.value()));
        }
        Ok(items)
    }

    /// Upsert one cart line. A non-positive quantity removes the line.
    pub fn set_quantity(&self, user_id: i64, sku_id: i64, quantity: i64) -> CartResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CART_TABLE)?;
            if quantity > 0 {
                table.insert((user_id, sku_id), quantity)?;
            } else {
                table.remove((user_id, sku_id))?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove the given SKUs from one user's cart in a single transaction.
    pub fn remove_many(&self, user_id: i64, sku_ids: &[i64]) -> CartResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CART_TABLE)?;
            for sku_id in sku_ids {
                table.remove((user_id, *sku_id))?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}
