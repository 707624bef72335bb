//! Payment initiation hook
//!
//! Fired after a successful commit with the order id and the amount due.
//! The gateway is an opaque external service: its outcome is logged but
//! never changes the commit's completion status — payment confirmation
//! flows back through its own callback, outside this service.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Payment hook errors
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("gateway rejected the request: {0}")]
    Rejected(String),

    #[error("gateway unreachable: {0}")]
    Unreachable(String),
}

/// Post-commit payment initiation.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initiate(&self, order_id: &str, amount_due_cents: i64) -> Result<(), PaymentError>;
}

/// Default gateway: records the initiation request and succeeds. Stands in
/// until a real provider integration is wired up.
pub struct LoggingGateway;

#[async_trait]
impl PaymentGateway for LoggingGateway {
    async fn initiate(&self, order_id: &str, amount_due_cents: i64) -> Result<(), PaymentError> {
        // Cents to a 2-place decimal amount at the boundary only
        let amount = Decimal::new(amount_due_cents, 2);
        tracing::info!(order_id, %amount, "payment initiation requested");
        Ok(())
    }
}
