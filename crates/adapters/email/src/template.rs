//! 邮件模板系统

use movie_errors::{AppError, AppResult};
use std::collections::HashMap;
use tera::Tera;
use tracing::debug;

const PASSWORD_RESET_HTML: &str = include_str!("../templates/password_reset.html");
const PASSWORD_RESET_TXT: &str = include_str!("../templates/password_reset.txt");

/// 邮件模板管理器
pub struct EmailTemplate {
    tera: Tera,
}

impl EmailTemplate {
    /// 从目录加载模板（`.html` 与 `.txt`）
    pub fn new(template_dir: &str) -> AppResult<Self> {
        let pattern = format!("{}/**/*.{{html,txt}}", template_dir);
        let tera = Tera::new(&pattern)
            .map_err(|e| AppError::internal(format!("Failed to load email templates: {}", e)))?;

        debug!(template_dir = %template_dir, "Email templates loaded");

        Ok(Self { tera })
    }

    /// 使用随 crate 内嵌的默认模板
    pub fn builtin() -> AppResult<Self> {
        let mut templates = HashMap::new();
        templates.insert(
            "password_reset.html".to_string(),
            PASSWORD_RESET_HTML.to_string(),
        );
        templates.insert(
            "password_reset.txt".to_string(),
            PASSWORD_RESET_TXT.to_string(),
        );
        Self::from_strings(templates)
    }

    /// 从内存中的模板字符串创建
    pub fn from_strings(templates: HashMap<String, String>) -> AppResult<Self> {
        let mut tera = Tera::default();

        for (name, content) in templates {
            tera.add_raw_template(&name, &content).map_err(|e| {
                AppError::internal(format!("Failed to add template {}: {}", name, e))
            })?;
        }

        Ok(Self { tera })
    }

    /// 渲染模板
    pub fn render(&self, template_name: &str, context: &serde_json::Value) -> AppResult<String> {
        let context = tera::Context::from_serialize(context)
            .map_err(|e| AppError::internal(format!("Failed to create template context: {}", e)))?;

        self.tera.render(template_name, &context).map_err(|e| {
            AppError::internal(format!(
                "Failed to render template {}: {}",
                template_name, e
            ))
        })
    }

    /// 渲染密码重置邮件，返回 (HTML, 纯文本)
    pub fn render_password_reset(
        &self,
        user_name: &str,
        reset_link: &str,
        expires_in_minutes: i64,
    ) -> AppResult<(String, String)> {
        let context = serde_json::json!({
            "user_name": user_name,
            "reset_link": reset_link,
            "expires_in_minutes": expires_in_minutes,
        });

        let html = self.render("password_reset.html", &context)?;
        let text = self.render("password_reset.txt", &context)?;

        Ok((html, text))
    }
}
