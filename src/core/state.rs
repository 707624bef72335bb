//! 共享状态 - 持有所有服务的单例引用

use std::sync::Arc;

use crate::cart::CartStore;
use crate::checkout::{CheckoutCoordinator, SqlStockLedger};
use crate::core::Config;
use crate::db::DbService;
use crate::services::LoggingGateway;
use crate::utils::AppError;

/// Shared application state. `Arc` fields make cloning cheap; one instance
/// serves every request.
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 读写连接池 |
/// | cart | 购物车快照存储 (redb) |
/// | checkout | 结算协调器 |
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DbService,
    pub cart: CartStore,
    pub checkout: Arc<CheckoutCoordinator>,
}

impl AppState {
    /// Initialize all services from the configuration.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.db_path()).await?;
        let cart = CartStore::open(config.cart_path())
            .map_err(|e| AppError::internal(format!("Failed to open cart store: {e}")))?;

        let checkout = Arc::new(CheckoutCoordinator::new(
            db.clone(),
            cart.clone(),
            Arc::new(SqlStockLedger),
            Arc::new(LoggingGateway),
            config.shipping_fee_cents,
        ));

        Ok(Self {
            config: config.clone(),
            db,
            cart,
            checkout,
        })
    }
}
