//! 会话存储 trait

use std::time::Duration;

use async_trait::async_trait;
use movie_common::SessionId;
use movie_errors::AppResult;

use crate::domain::entities::SessionData;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find(&self, id: &SessionId) -> AppResult<Option<SessionData>>;

    /// 保存会话，`ttl` 为不活动超时
    async fn save(&self, session: &SessionData, ttl: Duration) -> AppResult<()>;

    /// 刷新不活动超时
    async fn touch(&self, id: &SessionId, ttl: Duration) -> AppResult<()>;

    async fn delete(&self, id: &SessionId) -> AppResult<()>;
}
