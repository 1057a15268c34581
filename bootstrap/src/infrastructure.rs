//! 基础设施资源管理
//!
//! PostgreSQL 连接池与 Redis 连接由 bootstrap 统一初始化

use movie_adapter_postgres::{PostgresConfig, check_connection as check_postgres, create_pool};
use movie_adapter_redis::{
    RedisCache, check_connection as check_redis, create_connection_manager,
};
use movie_config::AppConfig;
use movie_errors::AppResult;
use movie_telemetry::HealthStatus;
use redis::aio::ConnectionManager;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
    redis_conn: ConnectionManager,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        Self::from_config_with_retry(config, &RetryConfig::default()).await
    }

    pub async fn from_config_with_retry(
        config: AppConfig,
        retry_config: &RetryConfig,
    ) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_min_connections(config.database.min_connections);
        let postgres_pool = with_retry(retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;

        let redis_url = config.redis.url.clone();
        let redis_conn = with_retry(retry_config, "Redis connection", || {
            let url = redis_url.expose_secret().clone();
            async move { create_connection_manager(&url).await }
        })
        .await?;

        info!(app_name = %config.app_name, "Infrastructure ready");

        Ok(Self {
            config,
            postgres_pool,
            redis_conn,
        })
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 获取 Redis 缓存（实现 CachePort trait），键以应用名为前缀
    pub fn redis_cache(&self) -> RedisCache {
        RedisCache::new(self.redis_conn.clone()).with_prefix(format!("{}:", self.config.app_name))
    }

    /// 检查所有依赖的连通性
    pub async fn health_status(&self) -> HealthStatus {
        let mut status = HealthStatus::new();

        match check_postgres(&self.postgres_pool).await {
            Ok(()) => status.add_check("postgres", true, None),
            Err(e) => status.add_check("postgres", false, Some(e.to_string())),
        }

        let mut conn = self.redis_conn.clone();
        match check_redis(&mut conn).await {
            Ok(()) => status.add_check("redis", true, None),
            Err(e) => status.add_check("redis", false, Some(e.to_string())),
        }

        status
    }
}
