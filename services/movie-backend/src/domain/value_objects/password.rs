//! Password 值对象
//!
//! 密码规则：至少 8 个字符，同时包含 ASCII 字母、数字和特殊字符。
//! 存储使用 Argon2 PHC 字符串。

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use movie_errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// 最小长度
pub const MIN_PASSWORD_LEN: usize = 8;

/// 允许计入"特殊字符"的字符集合
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// 明文密码（仅用于验证）
pub struct Password;

impl Password {
    /// 验证密码强度
    pub fn validate(password: &str) -> Result<(), PasswordError> {
        if Self::is_valid(password) {
            Ok(())
        } else {
            Err(PasswordError::TooWeak)
        }
    }

    pub fn is_valid(password: &str) -> bool {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return false;
        }

        let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

        has_letter && has_digit && has_special
    }
}

/// 哈希后的密码
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// 从明文密码创建哈希密码（先验证强度）
    pub fn from_plain(plain_password: &str) -> Result<Self, PasswordError> {
        Password::validate(plain_password)?;

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
            .to_string();

        Ok(Self(password_hash))
    }

    /// 验证明文密码是否匹配
    pub fn verify(&self, plain_password: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(&self.0).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(plain_password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// 对固定的哈希做一次校验，结果恒为 `false`
    ///
    /// 用于没有可比对哈希的分支
    pub fn verify_dummy(plain_password: &str) -> bool {
        static DUMMY: LazyLock<Option<HashedPassword>> =
            LazyLock::new(|| HashedPassword::from_plain("Dummy#Pass0").ok());

        if let Some(dummy) = DUMMY.as_ref() {
            let _ = dummy.verify(plain_password);
        }
        false
    }

    /// 从已有的哈希字符串创建
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// 密码错误
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error(
        "Password must be at least 8 characters and include a letter, a digit and a special character."
    )]
    TooWeak,
    #[error("Passwords do not match.")]
    Mismatch,
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
    #[error("Invalid password hash: {0}")]
    InvalidHash(String),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooWeak | PasswordError::Mismatch => AppError::validation(err.to_string()),
            PasswordError::HashingFailed(_) | PasswordError::InvalidHash(_) => {
                AppError::internal(err.to_string())
            }
        }
    }
}
