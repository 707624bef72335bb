//! Order models
//!
//! # 订单状态流转
//!
//! 结算核心只写入 [`OrderStatus::UnpaidPending`]；后续状态由支付回调和
//! 物流侧推进，不在本服务范围内。

use serde::{Deserialize, Serialize};

/// Payment method — a closed set of recognized codes.
///
/// Wire format is the numeric code; unrecognized codes are rejected during
/// commit validation, before any storage is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayMethod {
    /// 货到付款
    CashOnDelivery,
    /// 微信支付
    Wechat,
    /// 支付宝
    Alipay,
    /// 银联支付
    UnionPay,
}

impl PayMethod {
    /// Parse a caller-supplied code. Returns `None` for anything outside the
    /// closed set.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::CashOnDelivery),
            2 => Some(Self::Wechat),
            3 => Some(Self::Alipay),
            4 => Some(Self::UnionPay),
            _ => None,
        }
    }

    /// Stable numeric code, as stored in `order_info.pay_method`.
    pub fn code(self) -> u8 {
        match self {
            Self::CashOnDelivery => 1,
            Self::Wechat => 2,
            Self::Alipay => 3,
            Self::UnionPay => 4,
        }
    }
}

/// Order lifecycle status. Stored as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 待支付
    UnpaidPending,
    /// 待发货
    UnshippedPaid,
    /// 待收货
    UnreceivedShipped,
    /// 待评价
    UnratedReceived,
    /// 已完成
    Finished,
}

impl OrderStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::UnpaidPending),
            2 => Some(Self::UnshippedPaid),
            3 => Some(Self::UnreceivedShipped),
            4 => Some(Self::UnratedReceived),
            5 => Some(Self::Finished),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::UnpaidPending => 1,
            Self::UnshippedPaid => 2,
            Self::UnreceivedShipped => 3,
            Self::UnratedReceived => 4,
            Self::Finished => 5,
        }
    }
}

/// Order header row. Totals are zero until finalize writes them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderInfo {
    pub order_id: String,
    pub user_id: i64,
    pub addr_id: i64,
    pub pay_method: i64,
    pub total_count: i64,
    pub total_price_cents: i64,
    pub shipping_fee_cents: i64,
    pub status: i64,
    /// Unix timestamp (seconds)
    pub created_at: i64,
}

/// Order line row: one per successfully decremented SKU.
///
/// `price_cents` is the unit price observed by the successful decrement, so
/// historical orders are immune to later catalog price changes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: String,
    pub sku_id: i64,
    pub count: i64,
    pub price_cents: i64,
}
