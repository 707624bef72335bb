//! Commit coordinator — the checkout state machine
//!
//! Converts one user's cart snapshot into a persisted order while
//! decrementing shared stock, as one atomic unit.
//!
//! # Commit Flow
//!
//! ```text
//! commit(req)
//!     ├─ 1. Validate (addr / pay method / sku list) — no storage mutated yet
//!     ├─ 2. Begin write transaction
//!     ├─ 3. Insert order header (totals zero)
//!     ├─ 4. Per SKU, in caller order:
//!     │      ├─ read desired quantity from the cart snapshot
//!     │      ├─ conditional stock decrement, up to 3 attempts
//!     │      └─ insert order line at the observed unit price
//!     ├─ 5. Write aggregated totals onto the header
//!     ├─ 6. Commit transaction (everything becomes durable together)
//!     ├─ 7. Clear committed cart lines (advisory, outside the transaction)
//!     ├─ 8. Fire payment hook (result never affects completion)
//!     └─ 9. Return the order id
//! ```
//!
//! Any abort before step 6 rolls the transaction back; storage is left
//! exactly as it was before the attempt started.

use crate::cart::CartStore;
use crate::db::DbService;
use crate::db::models::PayMethod;
use crate::db::repository::{AddressRepository, OrderRepository, RepoError};
use crate::services::payment::PaymentGateway;
use crate::utils::order_id;
use crate::utils::validation::validate_sku_ids;
use chrono::Utc;
use serde::Serialize;
use sqlx::{Sqlite, SqliteConnection, Transaction};
use std::sync::Arc;

use super::assembler::OrderDraft;
use super::error::{CheckoutError, MAX_DECREMENT_ATTEMPTS};
use super::ledger::{DecrementOutcome, StockLedger};

/// Caller input for one checkout.
///
/// `addr_id` and `pay_method` are optional at the wire level so their
/// absence maps to a validation code instead of a deserialization error.
#[derive(Debug, Clone)]
pub struct CommitRequest {
    pub user_id: i64,
    pub addr_id: Option<i64>,
    pub pay_method: Option<u8>,
    pub sku_ids: Vec<i64>,
}

/// Returned to the caller on success.
#[derive(Debug, Clone, Serialize)]
pub struct CommitReceipt {
    pub order_id: String,
    pub total_count: i64,
    pub total_price_cents: i64,
    pub shipping_fee_cents: i64,
    /// Goods total plus shipping — handed to the payment hook.
    pub amount_due_cents: i64,
}

/// Orchestrates validation, the per-item decrement loop, aggregation and the
/// atomic commit. Holds no per-request state; one instance serves all
/// concurrent checkouts.
pub struct CheckoutCoordinator {
    db: DbService,
    cart: CartStore,
    ledger: Arc<dyn StockLedger>,
    payment: Arc<dyn PaymentGateway>,
    shipping_fee_cents: i64,
}

impl CheckoutCoordinator {
    pub fn new(
        db: DbService,
        cart: CartStore,
        ledger: Arc<dyn StockLedger>,
        payment: Arc<dyn PaymentGateway>,
        shipping_fee_cents: i64,
    ) -> Self {
        Self {
            db,
            cart,
            ledger,
            payment,
            shipping_fee_cents,
        }
    }

    /// Run one checkout to completion.
    pub async fn commit(&self, req: CommitRequest) -> Result<CommitReceipt, CheckoutError> {
        let (addr_id, pay_method) = self.validate(&req).await?;

        let mut draft = OrderDraft::new(
            order_id::generate(req.user_id),
            req.user_id,
            addr_id,
            pay_method,
            self.shipping_fee_cents,
            Utc::now().timestamp(),
        );

        let mut tx = self
            .db
            .begin_commit_tx()
            .await
            .map_err(CheckoutError::storage)?;

        if let Err(e) = self.fill_order(&mut tx, &mut draft, &req.sku_ids).await {
            if let Err(re) = tx.rollback().await {
                tracing::error!(error = %re, order_id = %draft.order_id, "rollback failed after aborted commit");
            }
            tracing::warn!(
                user_id = req.user_id,
                code = e.code().as_str(),
                "checkout aborted: {e}"
            );
            return Err(e);
        }

        tx.commit().await.map_err(CheckoutError::storage)?;

        let (total_count, total_price_cents) = draft.totals();
        tracing::info!(
            order_id = %draft.order_id,
            user_id = req.user_id,
            total_count,
            total_price_cents,
            "order committed"
        );

        // 7-8. Post-commit steps. The order is already durable; neither a
        // stale cart line nor a failed payment kickoff may undo it.
        if let Err(e) = self.cart.remove_many(req.user_id, &req.sku_ids) {
            tracing::warn!(user_id = req.user_id, error = %e, "failed to clear committed cart lines");
        }
        let amount_due_cents = draft.amount_due_cents();
        if let Err(e) = self.payment.initiate(&draft.order_id, amount_due_cents).await {
            tracing::warn!(order_id = %draft.order_id, error = %e, "payment initiation failed");
        }

        Ok(CommitReceipt {
            order_id: draft.order_id,
            total_count,
            total_price_cents,
            shipping_fee_cents: self.shipping_fee_cents,
            amount_due_cents,
        })
    }

    /// Step 1: reject incomplete or malformed input before any mutation.
    async fn validate(&self, req: &CommitRequest) -> Result<(i64, PayMethod), CheckoutError> {
        let addr_id = req
            .addr_id
            .ok_or_else(|| CheckoutError::Validation("addr_id is required".into()))?;
        let pay_code = req
            .pay_method
            .ok_or_else(|| CheckoutError::Validation("pay_method is required".into()))?;
        // Non-empty, bounded, no duplicates. A duplicated id would decrement
        // the same cart line once per occurrence.
        validate_sku_ids(&req.sku_ids).map_err(|e| CheckoutError::Validation(e.to_string()))?;

        let pay_method =
            PayMethod::from_code(pay_code).ok_or(CheckoutError::InvalidPayMethod(pay_code))?;

        let mut conn = self
            .db
            .read_pool
            .acquire()
            .await
            .map_err(CheckoutError::storage)?;
        AddressRepository::find_for_user(&mut conn, addr_id, req.user_id)
            .await
            .map_err(CheckoutError::storage)?
            .ok_or(CheckoutError::InvalidAddress {
                addr_id,
                user_id: req.user_id,
            })?;

        Ok((addr_id, pay_method))
    }

    /// Steps 3-5: everything inside the transaction scope.
    async fn fill_order(
        &self,
        tx: &mut Transaction<'static, Sqlite>,
        draft: &mut OrderDraft,
        sku_ids: &[i64],
    ) -> Result<(), CheckoutError> {
        OrderRepository::insert_header(&mut **tx, &draft.header())
            .await
            .map_err(|e| Self::header_insert_error(&draft.order_id, e))?;

        for &sku_id in sku_ids {
            // Missing cart line: removed between snapshot and commit.
            let quantity = self
                .cart
                .quantity_of(draft.user_id, sku_id)
                .map_err(CheckoutError::storage)?
                .ok_or(CheckoutError::ProductNotFound(sku_id))?;
            if quantity <= 0 {
                return Err(CheckoutError::Validation(format!(
                    "cart quantity for sku {sku_id} must be positive"
                )));
            }

            let unit_price_cents = self
                .decrement_with_retry(&mut **tx, sku_id, quantity)
                .await?;

            let line = draft.append_line(sku_id, quantity, unit_price_cents)?;
            OrderRepository::insert_line(
                &mut **tx,
                &draft.order_id,
                line.sku_id,
                line.quantity,
                line.unit_price_cents,
            )
            .await
            .map_err(CheckoutError::storage)?;
        }

        let (total_count, total_price_cents) = draft.totals();
        OrderRepository::write_totals(&mut **tx, &draft.order_id, total_count, total_price_cents)
            .await
            .map_err(CheckoutError::storage)?;
        Ok(())
    }

    /// A primary-key collision on the header means the same user committed
    /// twice within one second — a retriable outcome, not a storage fault.
    fn header_insert_error(order_id: &str, err: RepoError) -> CheckoutError {
        match err {
            RepoError::Duplicate(_) => CheckoutError::DuplicateOrder(order_id.to_string()),
            other => CheckoutError::storage(other),
        }
    }

    /// Step 4b: the bounded optimistic retry. Exactly
    /// [`MAX_DECREMENT_ATTEMPTS`] tries; conflicts re-read and retry,
    /// insufficient stock aborts immediately. Transient storage failures
    /// consume the same budget — if the budget ends on one, the abort is
    /// `StorageUnavailable` instead of `CommitFailed`.
    async fn decrement_with_retry(
        &self,
        conn: &mut SqliteConnection,
        sku_id: i64,
        quantity: i64,
    ) -> Result<i64, CheckoutError> {
        let mut last_storage_error: Option<RepoError> = None;

        for attempt in 1..=MAX_DECREMENT_ATTEMPTS {
            match self.ledger.try_decrement(&mut *conn, sku_id, quantity).await {
                Ok(DecrementOutcome::Applied {
                    new_stock,
                    unit_price_cents,
                    ..
                }) => {
                    tracing::debug!(sku_id, quantity, new_stock, attempt, "stock decremented");
                    return Ok(unit_price_cents);
                }
                Ok(DecrementOutcome::Insufficient { available }) => {
                    return Err(CheckoutError::OutOfStock {
                        sku_id,
                        requested: quantity,
                        available,
                    });
                }
                Ok(DecrementOutcome::Conflict) => {
                    tracing::debug!(sku_id, attempt, "stock decrement conflict, retrying");
                    last_storage_error = None;
                }
                Err(RepoError::NotFound(_)) => {
                    return Err(CheckoutError::ProductNotFound(sku_id));
                }
                Err(e) => {
                    tracing::warn!(sku_id, attempt, error = %e, "stock decrement attempt failed");
                    last_storage_error = Some(e);
                }
            }
        }

        Err(match last_storage_error {
            Some(e) => CheckoutError::storage(e),
            None => CheckoutError::CommitFailed { sku_id },
        })
    }
}
