//! 认证服务：本地登录、注销与当前用户解析

use std::sync::Arc;
use std::time::Duration;

use movie_common::SessionId;
use movie_errors::AppResult;
use tracing::{debug, info, warn};

use crate::application::dto::{CurrentUserDto, LoginResult, LoginUserDto};
use crate::domain::entities::{Principal, SessionData, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::domain::value_objects::HashedPassword;
use crate::error::AuthError;

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_ttl,
        }
    }

    /// 本地登录
    ///
    /// 先按登录 ID 查找，找不到且输入形如邮箱时按邮箱查找。
    /// 用户不存在与密码错误返回同一个错误
    pub async fn login(&self, login_id: &str, password: &str) -> AppResult<LoginResult> {
        let login_id = login_id.trim();
        let user = self.find_login_user(login_id).await?;
        // 用户不存在时同样执行一次哈希校验
        let verified = match &user {
            Some(user) => user.verify_password(password),
            None => HashedPassword::verify_dummy(password),
        };
        let user = match user {
            Some(user) if verified => user,
            found => {
                warn!(login_id, user_exists = found.is_some(), "Login failed");
                metrics::counter!("movie_backend_login_total", "result" => "failure").increment(1);
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let session = SessionData::for_local(user.id, user.login_id.as_str());
        self.session_repo.save(&session, self.session_ttl).await?;

        metrics::counter!("movie_backend_login_total", "result" => "success").increment(1);
        info!(user_id = %user.id, login_id = %user.login_id, "User logged in");

        Ok(LoginResult {
            user: LoginUserDto::from(&user),
            session,
        })
    }

    async fn find_login_user(&self, login_id: &str) -> AppResult<Option<User>> {
        if login_id.is_empty() {
            return Ok(None);
        }
        if let Some(user) = self.user_repo.find_by_login_id(login_id).await? {
            return Ok(Some(user));
        }
        if login_id.contains('@') {
            return self
                .user_repo
                .find_by_email(&login_id.to_lowercase())
                .await;
        }
        Ok(None)
    }

    /// 读取会话并刷新不活动超时
    pub async fn load_session(&self, id: &SessionId) -> AppResult<Option<SessionData>> {
        let session = self.session_repo.find(id).await?;
        if session.is_some() {
            self.session_repo.touch(id, self.session_ttl).await?;
        }
        Ok(session)
    }

    /// 保存新会话
    pub async fn start_session(&self, session: &SessionData) -> AppResult<()> {
        self.session_repo.save(session, self.session_ttl).await
    }

    /// 注销：删除服务端会话
    pub async fn logout(&self, id: Option<&SessionId>) -> AppResult<()> {
        if let Some(id) = id {
            self.session_repo.delete(id).await?;
            debug!("Session destroyed");
        }
        Ok(())
    }

    /// 解析当前用户
    ///
    /// 依次使用会话中的登录 ID、社交主体（提供方 + 提供方 ID）、本地主体（用户 ID）
    pub async fn current_user(
        &self,
        session: Option<&SessionData>,
    ) -> AppResult<Option<CurrentUserDto>> {
        let Some(session) = session else {
            return Ok(None);
        };

        if let Some(login_id) = &session.user_login_id {
            if let Some(user) = self.user_repo.find_by_login_id(login_id).await? {
                return Ok(Some(CurrentUserDto::from(&user)));
            }
        }

        let user = match &session.principal {
            Some(Principal::OAuth2(attrs)) => match (&attrs.email, &attrs.provider_id) {
                (Some(_), Some(provider_id)) => {
                    self.user_repo
                        .find_by_provider(attrs.provider, provider_id)
                        .await?
                }
                _ => None,
            },
            Some(Principal::Local { user_id, .. }) => self.user_repo.find_by_id(user_id).await?,
            None => None,
        };

        Ok(user.as_ref().map(CurrentUserDto::from))
    }
}
