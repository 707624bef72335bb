//! Repository Module
//!
//! CRUD operations for the checkout tables. Repositories take a
//! `&mut SqliteConnection` so multiple operations compose into one
//! transaction — the commit coordinator threads its write transaction
//! through every repository call it makes.

pub mod address;
pub mod order;
pub mod product;

pub use address::AddressRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(err.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
