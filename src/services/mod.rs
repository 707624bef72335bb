//! External collaborator services
//!
//! Seams to systems this service talks to but does not own.

pub mod payment;

pub use payment::{LoggingGateway, PaymentError, PaymentGateway};
