//! 密码重置令牌 Repository trait

use async_trait::async_trait;
use movie_common::UserId;
use movie_errors::AppResult;

use crate::domain::entities::PasswordResetToken;

#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    async fn save(&self, token: &PasswordResetToken) -> AppResult<()>;

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<PasswordResetToken>>;

    /// 原子地消费令牌：仅当令牌未使用且未过期时标记为已使用并返回，否则返回 `None`
    async fn claim_valid_token(&self, token_hash: &str) -> AppResult<Option<PasswordResetToken>>;

    /// 统计用户未使用且未过期的令牌数
    async fn count_active_by_user_id(&self, user_id: &UserId) -> AppResult<i64>;

    /// 作废用户所有未使用的令牌，返回作废数量
    async fn invalidate_by_user_id(&self, user_id: &UserId) -> AppResult<u64>;

    /// 删除过期令牌，返回删除数量
    async fn delete_expired(&self) -> AppResult<u64>;
}
