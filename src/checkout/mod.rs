//! Checkout core
//!
//! The one subsystem with real correctness risk: turning a cart snapshot
//! into a persisted order while decrementing shared stock under concurrent
//! buyers, all-or-nothing.
//!
//! - [`ledger`] — conditional stock decrement (optimistic CAS)
//! - [`assembler`] — order draft and running totals
//! - [`coordinator`] — validation, transaction scope, bounded retry
//! - [`preview`] — read-only confirmation summary
//! - [`error`] — the error-code contract

pub mod assembler;
pub mod coordinator;
pub mod error;
pub mod ledger;
pub mod preview;

pub use assembler::OrderDraft;
pub use coordinator::{CheckoutCoordinator, CommitReceipt, CommitRequest};
pub use error::{CheckoutError, CheckoutErrorCode, MAX_DECREMENT_ATTEMPTS};
pub use ledger::{DecrementOutcome, SqlStockLedger, StockLedger};
pub use preview::{OrderPreview, PreviewLine};
