//! Shipping address model

use serde::{Deserialize, Serialize};

/// A shipping address owned by one user.
///
/// Checkout only needs existence-for-user; the remaining fields ride along
/// for the confirmation page.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub id: i64,
    pub user_id: i64,
    pub receiver: String,
    pub detail: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub phone: String,
}
