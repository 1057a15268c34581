//! 用户服务：注册、重复检查、昵称推荐、找回 ID、社交账号补充信息

use std::sync::Arc;

use movie_errors::AppResult;
use tracing::{debug, info, warn};

use crate::application::dto::{
    FindIdOutcome, JoinCommand, SocialJoinOutcome, SocialPasswordJoinCommand,
    SocialPasswordJoinOutcome,
};
use crate::domain::entities::{SessionData, User};
use crate::domain::repositories::UserRepository;
use crate::domain::services::NicknameGenerator;
use crate::domain::value_objects::{
    Email, HashedPassword, LoginId, Nickname, Password, PasswordError,
};
use crate::error::UserError;

/// 推荐昵称数量
pub const RECOMMENDED_NICKNAMES: usize = 5;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    nickname_generator: NicknameGenerator,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self {
            nickname_generator: NicknameGenerator::new(user_repo.clone()),
            user_repo,
        }
    }

    /// 本地注册
    pub async fn join(&self, cmd: JoinCommand) -> AppResult<User> {
        if cmd.password != cmd.password_confirm {
            return Err(PasswordError::Mismatch.into());
        }

        let login_id = LoginId::new(cmd.login_id)?;
        let email = Email::new(cmd.email)?;
        let nickname = Nickname::new(cmd.nickname)?;
        Password::validate(&cmd.password)?;

        if self.user_repo.exists_by_login_id(login_id.as_str()).await? {
            return Err(UserError::DuplicateLoginId.into());
        }
        if self.user_repo.exists_by_email(email.as_str()).await? {
            return Err(UserError::DuplicateEmail.into());
        }
        if self.user_repo.exists_by_nickname(nickname.as_str()).await? {
            return Err(UserError::DuplicateNickname.into());
        }

        let password_hash = HashedPassword::from_plain(&cmd.password)?;
        let user = User::new_local(login_id, email, nickname, password_hash);
        self.user_repo.save(&user).await?;

        metrics::counter!("movie_backend_join_total").increment(1);
        info!(user_id = %user.id, login_id = %user.login_id, "User joined");
        Ok(user)
    }

    pub async fn check_login_id_duplicate(&self, login_id: &str) -> AppResult<bool> {
        self.user_repo.exists_by_login_id(login_id.trim()).await
    }

    pub async fn check_email_duplicate(&self, email: &str) -> AppResult<bool> {
        self.user_repo
            .exists_by_email(&email.trim().to_lowercase())
            .await
    }

    pub async fn check_nickname_duplicate(&self, nickname: &str) -> AppResult<bool> {
        self.user_repo.exists_by_nickname(nickname.trim()).await
    }

    pub async fn recommend_nicknames(&self) -> AppResult<Vec<String>> {
        self.nickname_generator
            .recommend(RECOMMENDED_NICKNAMES)
            .await
    }

    /// 按邮箱查找用户；格式不合法的邮箱视为不存在
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        match Email::new(email) {
            Ok(email) => self.user_repo.find_by_email(email.as_str()).await,
            Err(e) => {
                debug!(error = %e, "Lookup with malformed email");
                Ok(None)
            }
        }
    }

    /// 找回登录 ID（脱敏返回）
    pub async fn find_login_id(&self, email: &str) -> AppResult<FindIdOutcome> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(FindIdOutcome::NotFound);
        };

        if user.is_social() {
            return Ok(FindIdOutcome::SocialAccount {
                provider: user.provider,
            });
        }

        Ok(FindIdOutcome::Found {
            masked_login_id: user.login_id.masked(),
        })
    }

    /// 为社交账号设置密码，使其也能用本地方式登录
    pub async fn set_social_password(
        &self,
        cmd: SocialPasswordJoinCommand,
    ) -> AppResult<SocialPasswordJoinOutcome> {
        if cmd.password != cmd.password_confirm {
            return Ok(SocialPasswordJoinOutcome::PasswordMismatch);
        }

        let Some(mut user) = self.find_by_email(&cmd.email).await? else {
            return Ok(SocialPasswordJoinOutcome::NotFound);
        };

        if !user.is_social() {
            return Ok(SocialPasswordJoinOutcome::AlreadyLocal);
        }

        if !Password::is_valid(&cmd.password) {
            return Ok(SocialPasswordJoinOutcome::WeakPassword);
        }

        user.set_password(HashedPassword::from_plain(&cmd.password)?);
        self.user_repo.update(&user).await?;

        info!(user_id = %user.id, provider = %user.provider, "Password set for social account");
        Ok(SocialPasswordJoinOutcome::Completed)
    }

    /// 社交注册补充昵称并确认条款
    pub async fn complete_social_join(
        &self,
        session: Option<&SessionData>,
        nickname: Option<&str>,
        agree: Option<bool>,
    ) -> AppResult<SocialJoinOutcome> {
        let nickname = match nickname.map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => return Ok(SocialJoinOutcome::BlankNickname),
        };

        if agree != Some(true) {
            return Ok(SocialJoinOutcome::NotAgreed);
        }

        let Some(attributes) = session.and_then(SessionData::oauth2_attributes) else {
            return Ok(SocialJoinOutcome::NotSocialSession);
        };

        let (Some(_), Some(provider_id)) = (&attributes.email, &attributes.provider_id) else {
            warn!(provider = %attributes.provider, "Social session without email or provider id");
            return Ok(SocialJoinOutcome::IncompleteAttributes);
        };

        let Some(mut user) = self
            .user_repo
            .find_by_provider(attributes.provider, provider_id)
            .await?
        else {
            return Ok(SocialJoinOutcome::UserNotFound);
        };

        let nickname = match Nickname::new(nickname) {
            Ok(n) => n,
            Err(e) => return Ok(SocialJoinOutcome::InvalidNickname(e.to_string())),
        };

        if self.user_repo.exists_by_nickname(nickname.as_str()).await? {
            return Ok(SocialJoinOutcome::DuplicateNickname);
        }

        user.complete_social_join(nickname);
        self.user_repo.update(&user).await?;

        info!(user_id = %user.id, provider = %user.provider, "Social sign-up completed");
        Ok(SocialJoinOutcome::Completed)
    }
}
