//! 应用层命令与结果类型

use serde::Serialize;

use crate::domain::entities::{Provider, SessionData, User};

/// 本地注册
#[derive(Debug, Clone)]
pub struct JoinCommand {
    pub login_id: String,
    pub password: String,
    pub password_confirm: String,
    pub email: String,
    pub nickname: String,
}

/// 社交账号设置密码
#[derive(Debug, Clone)]
pub struct SocialPasswordJoinCommand {
    pub email: String,
    pub nickname: Option<String>,
    pub password: String,
    pub password_confirm: String,
}

/// 找回登录 ID 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindIdOutcome {
    NotFound,
    SocialAccount { provider: Provider },
    Found { masked_login_id: String },
}

impl FindIdOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::NotFound => "No account is registered with this email.".to_string(),
            Self::SocialAccount { provider } => format!(
                "This email belongs to a '{}' social account. Please use that social login button.",
                provider.display_name()
            ),
            Self::Found { .. } => "Your login ID was found.".to_string(),
        }
    }
}

/// 忘记密码的分支结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForgotPasswordOutcome {
    NotFound,
    SocialOnly {
        provider: Provider,
        email: String,
        nickname: Option<String>,
    },
    /// 已发送重置邮件
    Normal,
}

impl ForgotPasswordOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::SocialOnly { .. } => "SOCIAL_ONLY",
            Self::Normal => "NORMAL",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NotFound => "No account is registered with this email.".to_string(),
            Self::SocialOnly { provider, .. } => format!(
                "This account signs in with {} only. Would you also like to sign in with a password?",
                provider.display_name()
            ),
            Self::Normal => "A password reset link has been sent to your email.".to_string(),
        }
    }
}

/// 社交账号设置密码的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPasswordJoinOutcome {
    PasswordMismatch,
    NotFound,
    AlreadyLocal,
    WeakPassword,
    Completed,
}

impl SocialPasswordJoinOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::PasswordMismatch => "Passwords do not match.",
            Self::NotFound => "No account is registered with this email.",
            Self::AlreadyLocal => "This account already uses password login.",
            Self::WeakPassword => {
                "Password must be at least 8 characters and include a letter, a digit and a special character."
            }
            Self::Completed => "Your password has been set. You can now sign in with it as well.",
        }
    }
}

/// 社交注册补充信息的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialJoinOutcome {
    BlankNickname,
    NotAgreed,
    NotSocialSession,
    IncompleteAttributes,
    UserNotFound,
    InvalidNickname(String),
    DuplicateNickname,
    Completed,
}

impl SocialJoinOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn message(&self) -> String {
        match self {
            Self::BlankNickname => "Please enter a nickname.".to_string(),
            Self::NotAgreed => "You must agree to the terms to complete sign-up.".to_string(),
            Self::NotSocialSession => "Social login is required.".to_string(),
            Self::IncompleteAttributes => "Social login information is incomplete.".to_string(),
            Self::UserNotFound => "User not found. Please sign in again.".to_string(),
            Self::InvalidNickname(reason) => reason.clone(),
            Self::DuplicateNickname => "This nickname is already in use.".to_string(),
            Self::Completed => "Social sign-up is complete. Please sign in.".to_string(),
        }
    }
}

/// `/api/current-user` 返回的用户信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserDto {
    pub id: String,
    pub login_id: String,
    pub email: String,
    pub nickname: Option<String>,
    pub role: String,
    pub is_admin: bool,
    pub is_user: bool,
}

impl From<&User> for CurrentUserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            login_id: user.login_id.to_string(),
            email: user.email.to_string(),
            nickname: user.nickname_str().map(str::to_string),
            role: user.role.as_str().to_string(),
            is_admin: user.is_admin(),
            is_user: user.is_user(),
        }
    }
}

/// 登录成功返回的用户信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserDto {
    pub id: String,
    pub login_id: String,
    pub nickname: Option<String>,
    pub email: String,
    pub role: String,
    pub is_admin: bool,
}

impl From<&User> for LoginUserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            login_id: user.login_id.to_string(),
            nickname: user.nickname_str().map(str::to_string),
            email: user.email.to_string(),
            role: user.role.as_str().to_string(),
            is_admin: user.is_admin(),
        }
    }
}

/// 本地登录结果
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub session: SessionData,
    pub user: LoginUserDto,
}

/// 社交登录回调结果
#[derive(Debug, Clone)]
pub struct SocialLoginResult {
    pub session: SessionData,
    /// 登录后跳转地址
    pub redirect: String,
}
