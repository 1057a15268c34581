//! Metrics 模块
//!
//! Prometheus 记录器与连接池指标采集

use std::sync::Arc;
use std::time::Duration;

use metrics::gauge;
use metrics_exporter_prometheus::PrometheusHandle;
use movie_errors::{AppError, AppResult};
use tracing::debug;

use crate::infrastructure::Infrastructure;

/// Metrics 记录器
#[derive(Clone)]
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus 记录器（进程内只能调用一次）
    pub fn install() -> AppResult<Self> {
        let handle = movie_telemetry::init_metrics()
            .map_err(|e| AppError::internal(format!("Failed to install metrics recorder: {}", e)))?;
        Ok(Self { handle })
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 记录 PostgreSQL 连接池状态
pub fn record_pool_status(infra: &Infrastructure) {
    let pool = infra.postgres_pool();
    let size = pool.size();
    let idle = pool.num_idle() as u32;

    gauge!("connection_pool_size", "pool" => "postgres").set(size as f64);
    gauge!("connection_pool_active", "pool" => "postgres").set(size.saturating_sub(idle) as f64);
    gauge!("connection_pool_idle", "pool" => "postgres").set(idle as f64);
}

/// 启动后台连接池指标采集任务
pub fn spawn_pool_metrics(infra: Arc<Infrastructure>, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            record_pool_status(&infra);
            debug!("Pool metrics collected");
        }
    })
}
