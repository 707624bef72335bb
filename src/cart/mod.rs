//! Cart snapshot store
//!
//! The cart lives outside the relational schema in an embedded KV store.
//! During commit it is a read-only input; after a successful commit the
//! processed lines are deleted (advisory cleanup, outside the atomic scope).

pub mod store;

pub use store::{CartError, CartResult, CartStore};
