//! Email 值对象

use serde::{Deserialize, Serialize};
use std::fmt;

/// 最长允许的邮箱长度（RFC 5321）
const MAX_EMAIL_LEN: usize = 254;

/// Email 值对象，统一保存为小写
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// 创建新的 Email
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into();
        let trimmed = email.trim();

        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }

        if trimmed.len() > MAX_EMAIL_LEN || !email_address::EmailAddress::is_valid(trimmed) {
            return Err(EmailError::InvalidFormat(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// 从数据库中恢复，不再校验
    pub fn from_trusted(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 获取邮箱本地部分
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email 错误
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Please enter an email address.")]
    Empty,
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}
