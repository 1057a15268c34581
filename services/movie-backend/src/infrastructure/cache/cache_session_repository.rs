//! 会话存储（CachePort + JSON）

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use movie_common::SessionId;
use movie_errors::{AppError, AppResult};
use movie_ports::CachePort;
use tracing::warn;

use crate::domain::entities::SessionData;
use crate::domain::repositories::SessionRepository;

const SESSION_KEY_PREFIX: &str = "session:";

pub struct CacheSessionRepository {
    cache: Arc<dyn CachePort>,
}

impl CacheSessionRepository {
    pub fn new(cache: Arc<dyn CachePort>) -> Self {
        Self { cache }
    }

    fn key(id: &SessionId) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, id.as_str())
    }
}

#[async_trait]
impl SessionRepository for CacheSessionRepository {
    async fn find(&self, id: &SessionId) -> AppResult<Option<SessionData>> {
        let Some(raw) = self.cache.get(&Self::key(id)).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // 无法解析的会话视为不存在
                warn!(error = %e, "Discarding unreadable session");
                self.cache.delete(&Self::key(id)).await?;
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &SessionData, ttl: Duration) -> AppResult<()> {
        let value = serde_json::to_string(session)
            .map_err(|e| AppError::internal(format!("Failed to serialize session: {}", e)))?;
        self.cache
            .set(&Self::key(&session.id), &value, Some(ttl))
            .await
    }

    async fn touch(&self, id: &SessionId, ttl: Duration) -> AppResult<()> {
        self.cache.expire(&Self::key(id), ttl).await
    }

    async fn delete(&self, id: &SessionId) -> AppResult<()> {
        self.cache.delete(&Self::key(id)).await
    }
}
