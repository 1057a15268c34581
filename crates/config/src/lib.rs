//! movie-config - 配置加载库

use std::collections::HashMap;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

fn default_min_connections() -> u32 {
    1
}

/// Redis 配置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: Secret<String>,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// 允许跨域的来源，为空时放开所有来源
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 邮件配置
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub from_email: String,
    pub from_name: String,
    #[serde(default)]
    pub use_tls: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// 密码重置配置
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetConfig {
    #[serde(default = "default_token_expires_minutes")]
    pub token_expires_minutes: i64,
    /// 同一用户同时有效的令牌上限
    #[serde(default = "default_max_active_tokens")]
    pub max_active_tokens: u32,
    #[serde(default = "default_reset_link_base_url")]
    pub reset_link_base_url: String,
}

fn default_token_expires_minutes() -> i64 {
    15
}

fn default_max_active_tokens() -> u32 {
    3
}

fn default_reset_link_base_url() -> String {
    "http://localhost:8080/reset-password".to_string()
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            token_expires_minutes: default_token_expires_minutes(),
            max_active_tokens: default_max_active_tokens(),
            reset_link_base_url: default_reset_link_base_url(),
        }
    }
}

/// 会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_session_timeout_secs() -> u64 {
    3600
}

fn default_cookie_name() -> String {
    "MOVIE_SESSION".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_session_timeout_secs(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
        }
    }
}

/// 单个 OAuth2 提供方配置
#[derive(Debug, Clone, Deserialize)]
pub struct OAuth2ProviderConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub authorize_url: String,
    pub token_url: String,
    pub user_info_url: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// OAuth2 社交登录配置
#[derive(Debug, Clone, Deserialize)]
pub struct OAuth2Config {
    /// 键为提供方名称：google / kakao / naver
    #[serde(default)]
    pub providers: HashMap<String, OAuth2ProviderConfig>,
    #[serde(default = "default_state_ttl_secs")]
    pub state_ttl_secs: u64,
    #[serde(default = "default_success_redirect")]
    pub success_redirect: String,
    #[serde(default = "default_signup_redirect")]
    pub signup_redirect: String,
    #[serde(default = "default_failure_redirect")]
    pub failure_redirect: String,
}

fn default_state_ttl_secs() -> u64 {
    600
}

fn default_success_redirect() -> String {
    "/".to_string()
}

fn default_signup_redirect() -> String {
    "/social-join".to_string()
}

fn default_failure_redirect() -> String {
    "/login?error=oauth2".to_string()
}

impl Default for OAuth2Config {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            state_ttl_secs: default_state_ttl_secs(),
            success_redirect: default_success_redirect(),
            signup_redirect: default_signup_redirect(),
            failure_redirect: default_failure_redirect(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub password_reset: PasswordResetConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub oauth2: OAuth2Config,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 合并顺序：`default.toml` → `{APP_ENV}.toml` → `MOVIE_` 前缀环境变量（`__` 表示层级）
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let figment = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("MOVIE_").split("__"));

        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;
