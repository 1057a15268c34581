//! 社交登录（OAuth2 授权码流程）

use std::sync::Arc;
use std::time::Duration;

use movie_common::random_token;
use movie_config::OAuth2Config;
use movie_errors::{AppError, AppResult};
use movie_ports::CachePort;
use tracing::{info, warn};

use crate::application::AuthService;
use crate::application::dto::SocialLoginResult;
use crate::application::ports::OAuth2Client;
use crate::domain::entities::{Provider, SessionData, User};
use crate::domain::repositories::UserRepository;
use crate::domain::value_objects::Email;
use crate::error::AuthError;

const STATE_KEY_PREFIX: &str = "oauth2_state:";

pub struct SocialLoginService {
    user_repo: Arc<dyn UserRepository>,
    auth_service: Arc<AuthService>,
    client: Arc<dyn OAuth2Client>,
    cache: Arc<dyn CachePort>,
    config: OAuth2Config,
}

impl SocialLoginService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        auth_service: Arc<AuthService>,
        client: Arc<dyn OAuth2Client>,
        cache: Arc<dyn CachePort>,
        config: OAuth2Config,
    ) -> Self {
        Self {
            user_repo,
            auth_service,
            client,
            cache,
            config,
        }
    }

    pub fn failure_redirect(&self) -> &str {
        &self.config.failure_redirect
    }

    fn parse_provider(&self, provider: &str) -> AppResult<Provider> {
        match provider.parse::<Provider>() {
            Ok(p) if p.is_social() && self.client.supports(p) => Ok(p),
            _ => Err(AuthError::UnsupportedProvider(provider.to_string()).into()),
        }
    }

    /// 生成 state 并返回提供方授权地址
    pub async fn authorization_url(&self, provider: &str) -> AppResult<String> {
        let provider = self.parse_provider(provider)?;
        let state = random_token(16);

        self.cache
            .set(
                &format!("{}{}", STATE_KEY_PREFIX, state),
                provider.as_str(),
                Some(Duration::from_secs(self.config.state_ttl_secs)),
            )
            .await?;

        self.client.authorization_url(provider, &state)
    }

    /// 处理授权回调：校验 state，换取用户属性，登录或注册，建立会话
    pub async fn complete_login(
        &self,
        provider: &str,
        code: &str,
        state: &str,
    ) -> AppResult<SocialLoginResult> {
        let provider = self.parse_provider(provider)?;

        let stored = self
            .cache
            .take(&format!("{}{}", STATE_KEY_PREFIX, state))
            .await?;
        if stored.as_deref() != Some(provider.as_str()) {
            warn!(provider = %provider, "OAuth2 state mismatch");
            return Err(AuthError::InvalidState.into());
        }

        let attributes = self.client.fetch_attributes(provider, code).await?;
        let (Some(email), Some(provider_id)) = (&attributes.email, &attributes.provider_id) else {
            return Err(AuthError::IncompleteAttributes.into());
        };

        let user = match self
            .user_repo
            .find_by_provider(provider, provider_id)
            .await?
        {
            Some(user) => user,
            None => self.register(provider, provider_id, email).await?,
        };

        let session = SessionData::for_oauth2(attributes.clone());
        self.auth_service.start_session(&session).await?;

        let redirect = if user.social_join_completed {
            self.config.success_redirect.clone()
        } else {
            self.config.signup_redirect.clone()
        };

        info!(user_id = %user.id, provider = %provider, "Social login succeeded");
        Ok(SocialLoginResult { session, redirect })
    }

    async fn register(&self, provider: Provider, provider_id: &str, email: &str) -> AppResult<User> {
        let email = Email::new(email)?;
        if self.user_repo.exists_by_email(email.as_str()).await? {
            warn!(provider = %provider, "Social email already registered to another account");
            return Err(AppError::conflict(
                "This email is already registered with another account.",
            ));
        }

        let user = User::new_social(provider, provider_id, email);
        if self
            .user_repo
            .exists_by_login_id(user.login_id.as_str())
            .await?
        {
            warn!(provider = %provider, login_id = %user.login_id, "Social login ID already taken");
            return Err(AppError::conflict(
                "This social account cannot be linked because its login ID is already in use.",
            ));
        }

        self.user_repo.save(&user).await?;
        info!(user_id = %user.id, provider = %provider, "Social user registered");
        Ok(user)
    }
}
