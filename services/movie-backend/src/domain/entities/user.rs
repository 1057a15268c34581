//! 用户实体

use std::fmt;
use std::str::FromStr;

use movie_common::{AuditInfo, UserId};
use movie_domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Email, HashedPassword, LoginId, Nickname};

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// 账号来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provider {
    #[default]
    Local,
    Google,
    Kakao,
    Naver,
}

impl Provider {
    /// 持久化与接口中使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Google => "GOOGLE",
            Self::Kakao => "KAKAO",
            Self::Naver => "NAVER",
        }
    }

    /// 面向用户展示的名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Google => "Google",
            Self::Kakao => "Kakao",
            Self::Naver => "Naver",
        }
    }

    pub fn is_social(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOCAL" => Ok(Self::Local),
            "GOOGLE" => Ok(Self::Google),
            "KAKAO" => Ok(Self::Kakao),
            "NAVER" => Ok(Self::Naver),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub login_id: LoginId,
    pub email: Email,
    pub nickname: Option<Nickname>,
    pub password_hash: Option<HashedPassword>,
    pub role: Role,
    pub provider: Provider,
    pub provider_id: Option<String>,
    pub social_join_completed: bool,
    pub audit_info: AuditInfo,
}

impl User {
    /// 本地注册用户
    pub fn new_local(
        login_id: LoginId,
        email: Email,
        nickname: Nickname,
        password_hash: HashedPassword,
    ) -> Self {
        Self {
            id: UserId::new(),
            login_id,
            email,
            nickname: Some(nickname),
            password_hash: Some(password_hash),
            role: Role::User,
            provider: Provider::Local,
            provider_id: None,
            // 本地注册时已填写全部信息
            social_join_completed: true,
            audit_info: AuditInfo::default(),
        }
    }

    /// 首次社交登录时创建的用户，昵称在补充信息后设置
    pub fn new_social(provider: Provider, provider_id: impl Into<String>, email: Email) -> Self {
        let provider_id = provider_id.into();
        Self {
            id: UserId::new(),
            login_id: LoginId::for_social(provider.as_str(), &provider_id),
            email,
            nickname: None,
            password_hash: None,
            role: Role::User,
            provider,
            provider_id: Some(provider_id),
            social_join_completed: false,
            audit_info: AuditInfo::default(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_social(&self) -> bool {
        self.provider.is_social()
    }

    pub fn nickname_str(&self) -> Option<&str> {
        self.nickname.as_ref().map(Nickname::as_str)
    }

    /// 设置（或替换）密码，来源保持不变
    pub fn set_password(&mut self, password_hash: HashedPassword) {
        self.password_hash = Some(password_hash);
        self.touch();
    }

    /// 完成社交注册：设置昵称
    pub fn complete_social_join(&mut self, nickname: Nickname) {
        self.nickname = Some(nickname);
        self.social_join_completed = true;
        self.touch();
    }

    /// 校验密码；没有密码的账号一律不匹配
    pub fn verify_password(&self, plain_password: &str) -> bool {
        match &self.password_hash {
            Some(hash) => hash.verify(plain_password).unwrap_or(false),
            None => HashedPassword::verify_dummy(plain_password),
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for User {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_user() -> User {
        User::new_local(
            LoginId::new("moviefan").unwrap(),
            Email::new("fan@example.com").unwrap(),
            Nickname::new("popcorn").unwrap(),
            HashedPassword::from_plain("movie123!").unwrap(),
        )
    }

    #[test]
    fn test_new_local_user() {
        let user = local_user();
        assert!(user.is_user());
        assert!(!user.is_admin());
        assert!(!user.is_social());
        assert!(user.social_join_completed);
        assert_eq!(user.nickname_str(), Some("popcorn"));
        assert!(user.verify_password("movie123!"));
        assert!(!user.verify_password("wrong123!"));
    }

    #[test]
    fn test_new_social_user() {
        let user = User::new_social(
            Provider::Google,
            "10987",
            Email::new("g@example.com").unwrap(),
        );
        assert_eq!(user.login_id.as_str(), "google_10987");
        assert!(user.is_social());
        assert!(user.nickname.is_none());
        assert!(!user.verify_password("anything1!"));
    }

    #[test]
    fn test_complete_social_join() {
        let mut user = User::new_social(
            Provider::Naver,
            "n-1",
            Email::new("n@example.com").unwrap(),
        );
        user.complete_social_join(Nickname::new("night_owl").unwrap());
        assert!(user.social_join_completed);
        assert_eq!(user.nickname_str(), Some("night_owl"));
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("kakao".parse::<Provider>().unwrap(), Provider::Kakao);
        assert_eq!(Provider::Kakao.display_name(), "Kakao");
        assert_eq!(Provider::Naver.to_string(), "NAVER");
        assert!("github".parse::<Provider>().is_err());
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    }
}
