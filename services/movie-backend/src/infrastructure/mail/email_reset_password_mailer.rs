//! 密码重置邮件：tera 模板渲染 + EmailSender 发送

use std::sync::Arc;

use async_trait::async_trait;
use movie_adapter_email::{EmailSender, EmailTemplate};
use movie_errors::AppResult;
use tracing::debug;

use crate::application::ports::ResetPasswordMailer;

const RESET_SUBJECT: &str = "Reset your password";

pub struct EmailResetPasswordMailer {
    sender: Arc<dyn EmailSender>,
    templates: Arc<EmailTemplate>,
}

impl EmailResetPasswordMailer {
    pub fn new(sender: Arc<dyn EmailSender>, templates: Arc<EmailTemplate>) -> Self {
        Self { sender, templates }
    }
}

#[async_trait]
impl ResetPasswordMailer for EmailResetPasswordMailer {
    async fn send_reset_password_email(
        &self,
        to: &str,
        user_name: &str,
        reset_link: &str,
        expires_in_minutes: i64,
    ) -> AppResult<()> {
        let (html, text) =
            self.templates
                .render_password_reset(user_name, reset_link, expires_in_minutes)?;

        self.sender
            .send_html_email(to, RESET_SUBJECT, &html, Some(&text))
            .await?;

        debug!(to, "Reset password mail dispatched");
        Ok(())
    }
}
