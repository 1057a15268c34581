//! 应用层依赖的外部端口

use async_trait::async_trait;
use movie_errors::AppResult;

use crate::domain::entities::{OAuth2Attributes, Provider};

/// 密码重置邮件发送
#[async_trait]
pub trait ResetPasswordMailer: Send + Sync {
    async fn send_reset_password_email(
        &self,
        to: &str,
        user_name: &str,
        reset_link: &str,
        expires_in_minutes: i64,
    ) -> AppResult<()>;
}

/// OAuth2 授权码流程客户端
#[async_trait]
pub trait OAuth2Client: Send + Sync {
    /// 是否配置了该提供方
    fn supports(&self, provider: Provider) -> bool;

    /// 构造跳转到提供方的授权地址
    fn authorization_url(&self, provider: Provider, state: &str) -> AppResult<String>;

    /// 用授权码换取令牌并读取用户属性
    async fn fetch_attributes(&self, provider: Provider, code: &str) -> AppResult<OAuth2Attributes>;
}
