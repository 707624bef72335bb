//! Fresh Checkout - 生鲜电商结算服务
//!
//! # 架构概述
//!
//! 单节点、单数据库的订单提交服务。核心是把一次购物车快照原子地转换为
//! 持久化订单，同时在并发买家之间用乐观并发（条件更新 + 有界重试）
//! 扣减共享库存。
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、共享状态
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # SQLite 连接池、模型、仓储
//! ├── cart/          # 购物车快照存储 (redb)
//! ├── checkout/      # 结算核心：台账、装配、协调器
//! ├── services/      # 外部协作方 (支付钩子)
//! └── utils/         # 错误、日志、校验、订单号
//! ```
//!
//! 认证、页面渲染、支付网关本体、商品目录接口均为外部协作方，不在本
//! 服务内。

pub mod api;
pub mod cart;
pub mod checkout;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use cart::CartStore;
pub use checkout::{
    CheckoutCoordinator, CheckoutError, CheckoutErrorCode, CommitReceipt, CommitRequest,
    MAX_DECREMENT_ATTEMPTS, SqlStockLedger, StockLedger,
};
pub use self::core::{AppState, Config};
pub use db::DbService;
pub use services::{LoggingGateway, PaymentGateway};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
