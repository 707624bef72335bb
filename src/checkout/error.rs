//! Checkout error taxonomy
//!
//! Every abort path of a commit maps to exactly one [`CheckoutErrorCode`];
//! the HTTP layer serializes the code verbatim so callers can branch on it
//! (前端按错误码本地化). Nothing is swallowed: storage failures surface as
//! `STORAGE_UNAVAILABLE`, exhausted retries as `COMMIT_FAILED`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of attempts the coordinator gives one SKU's conditional decrement
/// before aborting the commit. This exact count is part of the contract —
/// callers size their own retries around it.
pub const MAX_DECREMENT_ATTEMPTS: u32 = 3;

/// Stable error codes returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutErrorCode {
    /// 参数不完整或非法
    Validation,
    /// 非法的支付方式
    InvalidPayMethod,
    /// 地址非法
    InvalidAddress,
    /// 商品不存在（目录或购物车）
    ProductNotFound,
    /// 库存不足
    OutOfStock,
    /// 下单失败（重试耗尽），可整单重试
    CommitFailed,
    /// 存储不可用
    StorageUnavailable,
}

impl CheckoutErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::InvalidPayMethod => "INVALID_PAY_METHOD",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::OutOfStock => "OUT_OF_STOCK",
            Self::CommitFailed => "COMMIT_FAILED",
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
        }
    }
}

/// Commit failure reasons.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("incomplete or malformed input: {0}")]
    Validation(String),

    #[error("unrecognized pay method code: {0}")]
    InvalidPayMethod(u8),

    #[error("address {addr_id} does not exist for user {user_id}")]
    InvalidAddress { addr_id: i64, user_id: i64 },

    #[error("product {0} not found")]
    ProductNotFound(i64),

    #[error("insufficient stock for product {sku_id}: requested {requested}, available {available}")]
    OutOfStock {
        sku_id: i64,
        requested: i64,
        available: i64,
    },

    #[error("commit failed for product {sku_id} after {MAX_DECREMENT_ATTEMPTS} attempts")]
    CommitFailed { sku_id: i64 },

    /// Same user committed twice within one second; the timestamp-based order
    /// id collided. The whole checkout is safe to retry.
    #[error("order id {0} already exists, retry the checkout")]
    DuplicateOrder(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl CheckoutError {
    /// The stable code for this failure.
    pub fn code(&self) -> CheckoutErrorCode {
        match self {
            Self::Validation(_) => CheckoutErrorCode::Validation,
            Self::InvalidPayMethod(_) => CheckoutErrorCode::InvalidPayMethod,
            Self::InvalidAddress { .. } => CheckoutErrorCode::InvalidAddress,
            Self::ProductNotFound(_) => CheckoutErrorCode::ProductNotFound,
            Self::OutOfStock { .. } => CheckoutErrorCode::OutOfStock,
            Self::CommitFailed { .. } => CheckoutErrorCode::CommitFailed,
            Self::DuplicateOrder(_) => CheckoutErrorCode::CommitFailed,
            Self::StorageUnavailable(_) => CheckoutErrorCode::StorageUnavailable,
        }
    }

    pub(crate) fn storage(err: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}
