//! LoginId 值对象

use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_LEN: usize = 4;
const MAX_LEN: usize = 20;

/// 社交账号登录 ID 的前缀，本地注册不可使用
const SOCIAL_PREFIXES: [&str; 3] = ["google_", "kakao_", "naver_"];

/// 登录 ID
///
/// 本地注册时只允许 ASCII 字母、数字和下划线；社交账号使用 `<provider>_<provider_id>` 形式生成
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoginId(String);

impl LoginId {
    pub fn new(login_id: impl Into<String>) -> Result<Self, LoginIdError> {
        let login_id = login_id.into();
        let login_id = login_id.trim();

        if login_id.is_empty() {
            return Err(LoginIdError::Empty);
        }

        let len = login_id.chars().count();
        if !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Err(LoginIdError::InvalidLength {
                min: MIN_LEN,
                max: MAX_LEN,
            });
        }

        if !login_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(LoginIdError::InvalidCharacters);
        }

        let lowered = login_id.to_ascii_lowercase();
        if SOCIAL_PREFIXES
            .iter()
            .any(|prefix| lowered.starts_with(prefix))
        {
            return Err(LoginIdError::ReservedPrefix);
        }

        Ok(Self(login_id.to_string()))
    }

    /// 社交账号的登录 ID
    pub fn for_social(provider: &str, provider_id: &str) -> Self {
        Self(format!("{}_{}", provider.to_lowercase(), provider_id))
    }

    pub fn from_trusted(login_id: impl Into<String>) -> Self {
        Self(login_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 脱敏后的登录 ID
    pub fn masked(&self) -> String {
        mask_login_id(&self.0)
    }
}

impl fmt::Display for LoginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 登录 ID 脱敏：长度大于 2 时保留前两位和最后一位，中间替换为 `***`
pub fn mask_login_id(login_id: &str) -> String {
    let chars: Vec<char> = login_id.chars().collect();
    if chars.len() <= 2 {
        return login_id.to_string();
    }

    let mut masked: String = chars[..2].iter().collect();
    masked.push_str("***");
    masked.push(chars[chars.len() - 1]);
    masked
}

#[derive(Debug, thiserror::Error)]
pub enum LoginIdError {
    #[error("Please enter a login ID.")]
    Empty,
    #[error("Login ID must be between {min} and {max} characters.")]
    InvalidLength { min: usize, max: usize },
    #[error("Login ID may only contain letters, digits and underscores.")]
    InvalidCharacters,
    #[error("Login ID may not start with a social provider prefix.")]
    ReservedPrefix,
}
