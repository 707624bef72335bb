//! Database models
//!
//! Row types for the checkout schema. All monetary fields are integer cents;
//! floats never touch money.

pub mod address;
pub mod order;
pub mod product;

pub use address::Address;
pub use order::{OrderInfo, OrderLine, OrderStatus, PayMethod};
pub use product::ProductSku;
