//! 密码重置令牌实体

use chrono::{DateTime, Duration, Utc};
use movie_common::{ResetTokenId, UserId};
use serde::{Deserialize, Serialize};

/// 密码重置令牌
///
/// 只保存令牌的 SHA-256 摘要，原始令牌只出现在邮件链接中
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetToken {
    pub id: ResetTokenId,
    pub user_id: UserId,
    pub email: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    pub fn new(
        user_id: UserId,
        email: impl Into<String>,
        token_hash: String,
        expires_in_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ResetTokenId::new(),
            user_id,
            email: email.into(),
            token_hash,
            expires_at: now + Duration::minutes(expires_in_minutes),
            used: false,
            used_at: None,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// 未使用且未过期
    pub fn is_valid(&self) -> bool {
        !self.used && !self.is_expired()
    }

    pub fn mark_as_used(&mut self) {
        self.used = true;
        self.used_at = Some(Utc::now());
    }
}
