//! Order assembler
//!
//! Builds the order header and line records from validated inputs and keeps
//! the running totals. Pure bookkeeping: no business validation (the
//! coordinator's job) and no storage access (the repositories' job).
//! All arithmetic is checked i64 cents — an overflow aborts the commit
//! instead of wrapping.

use crate::db::models::{OrderInfo, OrderStatus, PayMethod};

use super::error::CheckoutError;

/// One pending order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftLine {
    pub sku_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

/// An order under construction: header fields plus accumulated lines and
/// totals. Totals stay zero in storage until [`OrderDraft::totals`] is
/// written back by the finalize step.
#[derive(Debug)]
pub struct OrderDraft {
    pub order_id: String,
    pub user_id: i64,
    pub addr_id: i64,
    pub pay_method: PayMethod,
    pub shipping_fee_cents: i64,
    pub created_at: i64,
    lines: Vec<DraftLine>,
    total_count: i64,
    total_price_cents: i64,
}

impl OrderDraft {
    /// Start a new draft with zero totals.
    pub fn new(
        order_id: String,
        user_id: i64,
        addr_id: i64,
        pay_method: PayMethod,
        shipping_fee_cents: i64,
        created_at: i64,
    ) -> Self {
        Self {
            order_id,
            user_id,
            addr_id,
            pay_method,
            shipping_fee_cents,
            created_at,
            lines: Vec::new(),
            total_count: 0,
            total_price_cents: 0,
        }
    }

    /// The header row as first persisted: totals zero, status 待支付.
    pub fn header(&self) -> OrderInfo {
        OrderInfo {
            order_id: self.order_id.clone(),
            user_id: self.user_id,
            addr_id: self.addr_id,
            pay_method: i64::from(self.pay_method.code()),
            total_count: 0,
            total_price_cents: 0,
            shipping_fee_cents: self.shipping_fee_cents,
            status: OrderStatus::UnpaidPending.code(),
            created_at: self.created_at,
        }
    }

    /// Append a line and fold it into the running totals.
    pub fn append_line(
        &mut self,
        sku_id: i64,
        quantity: i64,
        unit_price_cents: i64,
    ) -> Result<DraftLine, CheckoutError> {
        let amount = unit_price_cents
            .checked_mul(quantity)
            .ok_or(CheckoutError::CommitFailed { sku_id })?;
        self.total_price_cents = self
            .total_price_cents
            .checked_add(amount)
            .ok_or(CheckoutError::CommitFailed { sku_id })?;
        self.total_count = self
            .total_count
            .checked_add(quantity)
            .ok_or(CheckoutError::CommitFailed { sku_id })?;

        let line = DraftLine {
            sku_id,
            quantity,
            unit_price_cents,
        };
        self.lines.push(line);
        Ok(line)
    }

    /// Aggregated `(total_count, total_price_cents)` for the finalize step.
    pub fn totals(&self) -> (i64, i64) {
        (self.total_count, self.total_price_cents)
    }

    /// Goods total plus shipping — what the buyer actually owes.
    pub fn amount_due_cents(&self) -> i64 {
        // Shipping fee is a small constant; saturating keeps the pathological
        // overflow case from panicking here (append_line already bounds it).
        self.total_price_cents.saturating_add(self.shipping_fee_cents)
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }
}
