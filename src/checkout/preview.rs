//! Pre-commit order preview
//!
//! Builds the confirmation summary the buyer sees before committing:
//! per-line amounts, totals and the shipping fee. Read-only — stock is not
//! validated or reserved here, so the numbers are advisory until commit.
//!
//! The per-line `amount_cents` lives on an explicit DTO rather than on the
//! catalog row: persisted entities never carry computed view fields.

use crate::cart::CartStore;
use crate::db::DbService;
use crate::db::repository::ProductRepository;
use serde::Serialize;

use super::error::CheckoutError;

/// One cart line priced against the current catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewLine {
    pub sku_id: i64,
    pub name: String,
    pub unit: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub amount_cents: i64,
}

/// The full confirmation summary.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPreview {
    pub lines: Vec<PreviewLine>,
    pub total_count: i64,
    pub total_price_cents: i64,
    pub shipping_fee_cents: i64,
    pub total_pay_cents: i64,
}

/// Price the given cart lines at current catalog prices.
pub async fn build(
    db: &DbService,
    cart: &CartStore,
    user_id: i64,
    sku_ids: &[i64],
    shipping_fee_cents: i64,
) -> Result<OrderPreview, CheckoutError> {
    if sku_ids.is_empty() {
        return Err(CheckoutError::Validation("sku_ids must not be empty".into()));
    }

    let mut conn = db
        .read_pool
        .acquire()
        .await
        .map_err(CheckoutError::storage)?;

    let mut lines = Vec::with_capacity(sku_ids.len());
    let mut total_count: i64 = 0;
    let mut total_price_cents: i64 = 0;

    for &sku_id in sku_ids {
        let sku = ProductRepository::find_by_id(&mut conn, sku_id)
            .await
            .map_err(CheckoutError::storage)?
            .ok_or(CheckoutError::ProductNotFound(sku_id))?;
        let quantity = cart
            .quantity_of(user_id, sku_id)
            .map_err(CheckoutError::storage)?
            .ok_or(CheckoutError::ProductNotFound(sku_id))?;

        let amount_cents = sku
            .price_cents
            .checked_mul(quantity)
            .ok_or(CheckoutError::CommitFailed { sku_id })?;
        total_count = total_count
            .checked_add(quantity)
            .ok_or(CheckoutError::CommitFailed { sku_id })?;
        total_price_cents = total_price_cents
            .checked_add(amount_cents)
            .ok_or(CheckoutError::CommitFailed { sku_id })?;

        lines.push(PreviewLine {
            sku_id,
            name: sku.name,
            unit: sku.unit,
            unit_price_cents: sku.price_cents,
            quantity,
            amount_cents,
        });
    }

    Ok(OrderPreview {
        lines,
        total_count,
        total_price_cents,
        shipping_fee_cents,
        total_pay_cents: total_price_cents.saturating_add(shipping_fee_cents),
    })
}
