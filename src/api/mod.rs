//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 订单提交与预览接口

pub mod health;
pub mod orders;

use crate::core::AppState;
use axum::Router;

/// Assemble the full API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
}

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
