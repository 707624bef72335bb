//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResponse`] - 应用错误类型和 API 响应结构
//! - [`logger`] - 日志初始化
//! - [`validation`] - 输入校验辅助
//! - [`order_id`] - 订单号生成

pub mod error;
pub mod logger;
pub mod order_id;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult};
