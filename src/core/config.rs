//! 服务配置
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | ./data | 工作目录 (数据库、购物车、日志) |
//! | HTTP_PORT | 3000 | HTTP 服务端口 |
//! | SHIPPING_FEE_CENTS | 1000 | 运费 (分) |
//! | REQUEST_TIMEOUT_MS | 30000 | 请求超时 (毫秒) |
//! | ENVIRONMENT | development | 运行环境 |
//!
//! # 示例
//!
//! ```ignore
//! WORK_DIR=/data/fresh HTTP_PORT=8080 cargo run
//! ```

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和购物车文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运费（分）。固定运费是刻意为之：运费策略在本服务范围之外。
    pub shipping_fee_cents: i64,
    /// 请求超时时间 (毫秒) — 重试预算按次数计，墙钟超时由这里兜底
    pub request_timeout_ms: u64,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置，未设置的使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            shipping_fee_cents: std::env::var("SHIPPING_FEE_CENTS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1000),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 订单数据库路径
    pub fn db_path(&self) -> String {
        format!("{}/checkout.db", self.work_dir)
    }

    /// 购物车存储路径
    pub fn cart_path(&self) -> String {
        format!("{}/cart.redb", self.work_dir)
    }
}
