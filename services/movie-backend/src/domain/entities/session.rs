//! 会话与认证主体

use chrono::{DateTime, Utc};
use movie_common::{SessionId, UserId};
use serde::{Deserialize, Serialize};

use super::Provider;

/// 社交登录返回的用户属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Attributes {
    pub email: Option<String>,
    pub provider: Provider,
    pub provider_id: Option<String>,
    pub name: Option<String>,
}

/// 当前会话中已认证的主体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
    /// 本地账号登录
    Local { user_id: UserId, login_id: String },
    /// 社交登录
    #[serde(rename = "oauth2")]
    OAuth2(OAuth2Attributes),
}

/// 服务端会话
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub id: SessionId,
    pub user_login_id: Option<String>,
    pub principal: Option<Principal>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new() -> Self {
        Self {
            id: SessionId::generate(),
            user_login_id: None,
            principal: None,
            created_at: Utc::now(),
        }
    }

    /// 本地登录成功后的会话
    pub fn for_local(user_id: UserId, login_id: impl Into<String>) -> Self {
        let login_id = login_id.into();
        Self {
            user_login_id: Some(login_id.clone()),
            principal: Some(Principal::Local { user_id, login_id }),
            ..Self::new()
        }
    }

    /// 社交登录成功后的会话
    pub fn for_oauth2(attributes: OAuth2Attributes) -> Self {
        Self {
            principal: Some(Principal::OAuth2(attributes)),
            ..Self::new()
        }
    }

    pub fn oauth2_attributes(&self) -> Option<&OAuth2Attributes> {
        match &self.principal {
            Some(Principal::OAuth2(attrs)) => Some(attrs),
            _ => None,
        }
    }
}

impl Default for SessionData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_json_shape() {
        let session = SessionData::for_oauth2(OAuth2Attributes {
            email: Some("k@example.com".into()),
            provider: Provider::Kakao,
            provider_id: Some("42".into()),
            name: None,
        });
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["principal"]["kind"], "oauth2");
        assert_eq!(json["principal"]["provider"], "KAKAO");

        let restored: SessionData = serde_json::from_value(json).unwrap();
        assert_eq!(restored.oauth2_attributes().unwrap().provider_id.as_deref(), Some("42"));
        assert!(restored.user_login_id.is_none());
    }

    #[test]
    fn test_local_session() {
        let user_id = UserId::new();
        let session = SessionData::for_local(user_id, "moviefan");
        assert_eq!(session.user_login_id.as_deref(), Some("moviefan"));
        assert!(session.oauth2_attributes().is_none());
        assert_eq!(
            session.principal,
            Some(Principal::Local {
                user_id,
                login_id: "moviefan".into()
            })
        );
    }
}
