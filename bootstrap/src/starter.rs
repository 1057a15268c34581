//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use movie_config::AppConfig;
use movie_errors::AppResult;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::metrics::{MetricsRecorder, spawn_pool_metrics};
use crate::runtime::{init_runtime, shutdown_signal};

/// 传递给路由构建闭包的上下文
pub struct ServiceContext {
    pub infra: Arc<Infrastructure>,
    pub metrics: Option<MetricsRecorder>,
}

/// 运行 HTTP 服务
///
/// 1. 加载 `.env` 与配置
/// 2. 初始化运行时（日志）
/// 3. 安装 metrics 记录器（按配置）
/// 4. 创建基础设施资源（数据库、Redis）
/// 5. 调用闭包构建 axum Router
/// 6. 启动服务器并处理 graceful shutdown
///
/// ```ignore
/// movie_bootstrap::run_http("config", |ctx| async move {
///     Ok(build_router(ctx.infra.postgres_pool()))
/// })
/// .await
/// ```
pub async fn run_http<F, Fut>(
    config_dir: &str,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(ServiceContext) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    dotenvy::dotenv().ok();

    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = if config.telemetry.metrics_enabled {
        Some(MetricsRecorder::install()?)
    } else {
        None
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let infra = Arc::new(Infrastructure::from_config(config).await?);
    let metrics_task = metrics
        .as_ref()
        .map(|_| spawn_pool_metrics(infra.clone(), Duration::from_secs(15)));

    let router = router_builder(ServiceContext {
        infra: infra.clone(),
        metrics,
    })
    .await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = metrics_task {
        task.abort();
    }

    info!("Service stopped");
    Ok(())
}
