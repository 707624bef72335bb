use std::time::Duration;

use fresh_checkout::{AppState, Config, api, init_logger};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境与日志
    dotenv::dotenv().ok();
    init_logger();

    tracing::info!("🍓 Fresh Checkout starting...");

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 初始化服务状态 (数据库、购物车、结算协调器)
    let state = AppState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    let app = api::router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_millis(
            config.request_timeout_ms,
        )))
        .with_state(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("Listening on {addr} ({})", config.environment);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}
