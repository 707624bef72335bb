//! 配置与共享状态

pub mod config;
pub mod state;

pub use config::Config;
pub use state::AppState;
