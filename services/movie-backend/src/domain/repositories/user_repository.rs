//! 用户 Repository trait

use async_trait::async_trait;
use movie_common::UserId;
use movie_errors::AppResult;

use crate::domain::entities::{Provider, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;

    /// 根据登录 ID 查找用户
    async fn find_by_login_id(&self, login_id: &str) -> AppResult<Option<User>>;

    /// 根据邮箱查找用户（邮箱已小写）
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 根据社交账号查找用户
    async fn find_by_provider(
        &self,
        provider: Provider,
        provider_id: &str,
    ) -> AppResult<Option<User>>;

    async fn exists_by_login_id(&self, login_id: &str) -> AppResult<bool>;

    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool>;

    /// 保存新用户
    async fn save(&self, user: &User) -> AppResult<()>;

    /// 更新用户
    async fn update(&self, user: &User) -> AppResult<()>;
}
