//! Product SKU model

use serde::{Deserialize, Serialize};

/// A purchasable product variant with its own price and stock counters.
///
/// `stock` and `sales` are owned by the inventory ledger: the only write
/// path is the ledger's conditional decrement, which re-checks the observed
/// stock value at update time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductSku {
    pub id: i64,
    pub name: String,
    /// Sales unit shown to the buyer, e.g. "500g" / "盒"
    #[serde(default)]
    pub unit: String,
    pub price_cents: i64,
    pub stock: i64,
    pub sales: i64,
}
