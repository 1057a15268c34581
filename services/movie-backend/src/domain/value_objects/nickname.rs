//! Nickname 值对象

use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 20;

/// 昵称（按字符计长度，允许非 ASCII）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(nickname: impl Into<String>) -> Result<Self, NicknameError> {
        let nickname = nickname.into();
        let nickname = nickname.trim();

        if nickname.is_empty() {
            return Err(NicknameError::Empty);
        }

        let len = nickname.chars().count();
        if !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Err(NicknameError::InvalidLength {
                min: MIN_LEN,
                max: MAX_LEN,
            });
        }

        Ok(Self(nickname.to_string()))
    }

    pub fn from_trusted(nickname: impl Into<String>) -> Self {
        Self(nickname.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NicknameError {
    #[error("Please enter a nickname.")]
    Empty,
    #[error("Nickname must be between {min} and {max} characters.")]
    InvalidLength { min: usize, max: usize },
}
