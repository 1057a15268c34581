//! 密码重置服务
//!
//! 令牌生成、校验与一次性消费。原始令牌只返回给调用方用于组装邮件链接，
//! 持久化的只有 SHA-256 摘要。

use std::sync::Arc;

use movie_common::{UserId, random_token, sha256_hex};
use movie_config::PasswordResetConfig;
use movie_errors::{AppError, AppResult};
use tracing::{debug, info, warn};

use crate::domain::entities::{PasswordResetToken, User};
use crate::domain::repositories::{PasswordResetRepository, UserRepository};
use crate::domain::value_objects::HashedPassword;

/// 令牌随机字节数（64 个十六进制字符）
const TOKEN_BYTES: usize = 32;

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired reset token.";

/// 密码重置服务
pub struct PasswordResetService {
    password_reset_repo: Arc<dyn PasswordResetRepository>,
    user_repo: Arc<dyn UserRepository>,
    config: PasswordResetConfig,
}

impl PasswordResetService {
    pub fn new(
        password_reset_repo: Arc<dyn PasswordResetRepository>,
        user_repo: Arc<dyn UserRepository>,
        config: PasswordResetConfig,
    ) -> Self {
        Self {
            password_reset_repo,
            user_repo,
            config,
        }
    }

    pub fn expires_in_minutes(&self) -> i64 {
        self.config.token_expires_minutes
    }

    /// 为用户生成密码重置令牌，返回原始令牌
    pub async fn create_token(&self, user: &User) -> AppResult<String> {
        let active = self
            .password_reset_repo
            .count_active_by_user_id(&user.id)
            .await?;

        if active >= i64::from(self.config.max_active_tokens) {
            warn!(user_id = %user.id, active, "Too many active password reset tokens");
            return Err(AppError::resource_exhausted(
                "Too many pending password reset requests. Please try again later.",
            ));
        }

        let raw_token = random_token(TOKEN_BYTES);
        let token = PasswordResetToken::new(
            user.id,
            user.email.as_str(),
            sha256_hex(&raw_token),
            self.config.token_expires_minutes,
        );
        self.password_reset_repo.save(&token).await?;

        info!(
            user_id = %user.id,
            token_id = %token.id,
            expires_at = %token.expires_at,
            "Password reset token created"
        );

        Ok(raw_token)
    }

    /// 校验令牌：存在、未使用、未过期
    pub async fn validate_token(&self, raw_token: &str) -> AppResult<PasswordResetToken> {
        let raw_token = raw_token.trim();
        if raw_token.is_empty() {
            return Err(AppError::validation(INVALID_TOKEN_MESSAGE));
        }

        let token = self
            .password_reset_repo
            .find_by_token_hash(&sha256_hex(raw_token))
            .await?
            .ok_or_else(|| {
                debug!("Password reset token not found");
                AppError::validation(INVALID_TOKEN_MESSAGE)
            })?;

        if !token.is_valid() {
            warn!(
                token_id = %token.id,
                used = token.used,
                expired = token.is_expired(),
                "Rejected password reset token"
            );
            return Err(AppError::validation(INVALID_TOKEN_MESSAGE));
        }

        Ok(token)
    }

    /// 使用令牌重置密码
    ///
    /// 令牌先被原子地消费，同一令牌的并发请求只有一个能继续；
    /// 成功后同一用户的其他令牌一并作废
    pub async fn reset_password(&self, raw_token: &str, new_password: &str) -> AppResult<UserId> {
        let raw_token = raw_token.trim();
        if raw_token.is_empty() {
            return Err(AppError::validation(INVALID_TOKEN_MESSAGE));
        }

        // 弱密码不消耗令牌
        let password_hash = HashedPassword::from_plain(new_password)?;

        let token = self
            .password_reset_repo
            .claim_valid_token(&sha256_hex(raw_token))
            .await?
            .ok_or_else(|| {
                warn!("Password reset token missing, used or expired");
                AppError::validation(INVALID_TOKEN_MESSAGE)
            })?;

        let mut user = self
            .user_repo
            .find_by_id(&token.user_id)
            .await?
            .ok_or_else(|| AppError::validation(INVALID_TOKEN_MESSAGE))?;

        user.set_password(password_hash);
        self.user_repo.update(&user).await?;

        let revoked = self
            .password_reset_repo
            .invalidate_by_user_id(&user.id)
            .await?;

        info!(user_id = %user.id, token_id = %token.id, revoked, "Password reset completed");
        Ok(user.id)
    }

    /// 清理过期令牌
    pub async fn cleanup_expired_tokens(&self) -> AppResult<u64> {
        let deleted = self.password_reset_repo.delete_expired().await?;
        info!(deleted, "Expired password reset tokens cleaned up");
        Ok(deleted)
    }
}
