//! Redis 连接管理
//!
//! 会话与 OAuth2 state 的读写都在请求路径上，连接与响应超时需要有上限

use std::time::Duration;

use movie_errors::{AppError, AppResult};
use redis::Client;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use tracing::info;

/// 连接管理器参数
#[derive(Debug, Clone)]
pub struct RedisOptions {
    pub connection_timeout: Duration,
    pub response_timeout: Duration,
    /// 断线重连的重试次数
    pub reconnect_retries: usize,
}

impl Default for RedisOptions {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(2),
            reconnect_retries: 6,
        }
    }
}

impl RedisOptions {
    fn manager_config(&self) -> ConnectionManagerConfig {
        ConnectionManagerConfig::new()
            .set_connection_timeout(self.connection_timeout)
            .set_response_timeout(self.response_timeout)
            .set_number_of_retries(self.reconnect_retries)
    }
}

/// 使用默认参数创建连接管理器
pub async fn create_connection_manager(url: &str) -> AppResult<ConnectionManager> {
    create_connection_manager_with(url, &RedisOptions::default()).await
}

pub async fn create_connection_manager_with(
    url: &str,
    options: &RedisOptions,
) -> AppResult<ConnectionManager> {
    let client = Client::open(url)
        .map_err(|e| AppError::internal(format!("Invalid Redis URL: {}", e)))?;
    // 只记录地址，URL 中可能带密码
    let addr = client.get_connection_info().addr.to_string();

    let manager = ConnectionManager::new_with_config(client, options.manager_config())
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to Redis at {}: {}", addr, e)))?;

    info!(
        %addr,
        response_timeout_ms = options.response_timeout.as_millis() as u64,
        "Redis connection manager created"
    );
    Ok(manager)
}

/// PING 检查，期望返回 PONG
pub async fn check_connection(conn: &mut ConnectionManager) -> AppResult<()> {
    let reply: String = redis::cmd("PING")
        .query_async(conn)
        .await
        .map_err(|e| AppError::internal(format!("Redis health check failed: {}", e)))?;

    if reply != "PONG" {
        return Err(AppError::internal(format!(
            "Unexpected Redis PING reply: {}",
            reply
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let err = create_connection_manager("not-a-redis-url").await.err().unwrap();
        assert!(err.to_string().contains("Invalid Redis URL"));
    }

    #[test]
    fn test_default_options() {
        let options = RedisOptions::default();
        assert!(options.response_timeout < options.connection_timeout);
        assert_eq!(options.reconnect_retries, 6);
    }
}
