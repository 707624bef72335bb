//! Database Module
//!
//! Handles SQLite connection pools and migrations.
//!
//! SQLite allows a single writer at a time. Commit transactions therefore
//! run on a dedicated one-connection write pool: concurrent checkouts queue
//! at connection acquisition instead of hitting busy/snapshot errors in the
//! middle of a transaction. Reads use a separate pool.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;

/// Database service — owns the SQLite connection pools
#[derive(Clone)]
pub struct DbService {
    /// Read pool, multiple connections
    pub read_pool: SqlitePool,
    /// Write pool, exactly one connection (SQLite single-writer)
    pub write_pool: SqlitePool,
}

impl DbService {
    /// Create a new database service with WAL mode and separate read/write pools
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let write_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let read_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        // busy_timeout: 写冲突时等待 5s 而非立即失败
        for pool in [&write_pool, &read_pool] {
            sqlx::query("PRAGMA busy_timeout = 5000;")
                .execute(pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;
        }

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations")
            .run(&write_pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self {
            read_pool,
            write_pool,
        })
    }

    /// Begin a commit transaction on the write connection.
    ///
    /// All order-commit writes happen inside one of these; rollback restores
    /// storage to the pre-attempt state.
    pub async fn begin_commit_tx(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.write_pool.begin().await
    }
}
