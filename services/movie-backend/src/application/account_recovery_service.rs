//! 账号找回：忘记密码分支与重置链接投递

use std::sync::Arc;

use movie_errors::AppResult;
use tracing::info;

use crate::application::UserService;
use crate::application::dto::ForgotPasswordOutcome;
use crate::application::ports::ResetPasswordMailer;
use crate::domain::services::PasswordResetService;
use crate::domain::value_objects::{Password, PasswordError};

pub struct AccountRecoveryService {
    user_service: Arc<UserService>,
    password_reset: Arc<PasswordResetService>,
    mailer: Arc<dyn ResetPasswordMailer>,
    reset_link_base_url: String,
}

impl AccountRecoveryService {
    pub fn new(
        user_service: Arc<UserService>,
        password_reset: Arc<PasswordResetService>,
        mailer: Arc<dyn ResetPasswordMailer>,
        reset_link_base_url: impl Into<String>,
    ) -> Self {
        Self {
            user_service,
            password_reset,
            mailer,
            reset_link_base_url: reset_link_base_url.into(),
        }
    }

    /// 重置链接：`{base}?token={urlencoded token}`
    pub fn reset_link(&self, raw_token: &str) -> String {
        format!(
            "{}?token={}",
            self.reset_link_base_url,
            urlencoding::encode(raw_token)
        )
    }

    /// 忘记密码
    ///
    /// 未注册返回 `NotFound`；社交账号返回 `SocialOnly` 以便前端引导设置密码；
    /// 本地账号生成令牌并发送重置邮件
    pub async fn forgot_password(&self, email: &str) -> AppResult<ForgotPasswordOutcome> {
        let Some(user) = self.user_service.find_by_email(email).await? else {
            return Ok(ForgotPasswordOutcome::NotFound);
        };

        if user.is_social() {
            return Ok(ForgotPasswordOutcome::SocialOnly {
                provider: user.provider,
                email: user.email.to_string(),
                nickname: user.nickname_str().map(str::to_string),
            });
        }

        let raw_token = self.password_reset.create_token(&user).await?;
        let reset_link = self.reset_link(&raw_token);
        let user_name = user
            .nickname_str()
            .unwrap_or_else(|| user.login_id.as_str());

        self.mailer
            .send_reset_password_email(
                user.email.as_str(),
                user_name,
                &reset_link,
                self.password_reset.expires_in_minutes(),
            )
            .await?;

        metrics::counter!("movie_backend_password_reset_total", "stage" => "requested")
            .increment(1);
        info!(user_id = %user.id, "Password reset mail sent");
        Ok(ForgotPasswordOutcome::Normal)
    }

    /// 校验重置令牌是否可用
    pub async fn validate_reset_token(&self, raw_token: &str) -> AppResult<()> {
        self.password_reset.validate_token(raw_token).await?;
        Ok(())
    }

    /// 使用令牌重置密码，先检查两次输入一致与密码强度
    pub async fn reset_password(
        &self,
        raw_token: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> AppResult<()> {
        if new_password != new_password_confirm {
            return Err(PasswordError::Mismatch.into());
        }
        Password::validate(new_password)?;

        self.password_reset
            .reset_password(raw_token, new_password)
            .await?;

        metrics::counter!("movie_backend_password_reset_total", "stage" => "completed")
            .increment(1);
        Ok(())
    }
}
