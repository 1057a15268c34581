//! 基于 reqwest 的 OAuth2 授权码客户端
//!
//! 用户信息接口的返回结构因提供方而异：
//! - Google: `sub` / `email` / `name`
//! - Kakao: `id` / `kakao_account.email` / `kakao_account.profile.nickname`
//! - Naver: `response.id` / `response.email` / `response.nickname`

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use movie_config::{OAuth2Config, OAuth2ProviderConfig};
use movie_errors::{AppError, AppResult};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::application::ports::OAuth2Client;
use crate::domain::entities::{OAuth2Attributes, Provider};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct HttpOAuth2Client {
    http: reqwest::Client,
    providers: HashMap<Provider, OAuth2ProviderConfig>,
}

impl HttpOAuth2Client {
    /// 只注册名称可识别的社交提供方，其余配置项被忽略
    pub fn new(config: &OAuth2Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        let mut providers = HashMap::new();
        for (name, provider_config) in &config.providers {
            match name.parse::<Provider>() {
                Ok(provider) if provider.is_social() => {
                    providers.insert(provider, provider_config.clone());
                }
                _ => warn!(provider = %name, "Ignoring unknown OAuth2 provider"),
            }
        }

        Ok(Self { http, providers })
    }

    fn provider_config(&self, provider: Provider) -> AppResult<&OAuth2ProviderConfig> {
        self.providers.get(&provider).ok_or_else(|| {
            AppError::not_found(format!("OAuth2 provider {} is not configured", provider))
        })
    }

    async fn exchange_code(&self, config: &OAuth2ProviderConfig, code: &str) -> AppResult<String> {
        let response = self
            .http
            .post(&config.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.expose_secret().as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Token request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::external_service(format!("Token endpoint rejected code: {}", e)))?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Invalid token response: {}", e)))?;

        Ok(token.access_token)
    }
}

#[async_trait]
impl OAuth2Client for HttpOAuth2Client {
    fn supports(&self, provider: Provider) -> bool {
        self.providers.contains_key(&provider)
    }

    fn authorization_url(&self, provider: Provider, state: &str) -> AppResult<String> {
        let config = self.provider_config(provider)?;
        let scope = config.scopes.join(" ");

        let mut params = vec![
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("state", state),
        ];
        if !scope.is_empty() {
            params.push(("scope", scope.as_str()));
        }

        let url = Url::parse_with_params(&config.authorize_url, &params)
            .map_err(|e| AppError::internal(format!("Invalid authorize URL: {}", e)))?;
        Ok(url.into())
    }

    async fn fetch_attributes(&self, provider: Provider, code: &str) -> AppResult<OAuth2Attributes> {
        let config = self.provider_config(provider)?;
        let access_token = self.exchange_code(config, code).await?;

        let body: Value = self
            .http
            .get(&config.user_info_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("User info request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::external_service(format!("User info rejected: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Invalid user info response: {}", e)))?;

        debug!(provider = %provider, "OAuth2 user info received");
        Ok(extract_attributes(provider, &body))
    }
}

/// 从用户信息 JSON 中提取统一属性
pub fn extract_attributes(provider: Provider, body: &Value) -> OAuth2Attributes {
    let (id, email, name) = match provider {
        Provider::Google => (body.get("sub"), body.get("email"), body.get("name")),
        Provider::Kakao => (
            body.get("id"),
            body.pointer("/kakao_account/email"),
            body.pointer("/kakao_account/profile/nickname"),
        ),
        Provider::Naver => (
            body.pointer("/response/id"),
            body.pointer("/response/email"),
            body.pointer("/response/nickname"),
        ),
        Provider::Local => (None, None, None),
    };

    OAuth2Attributes {
        email: email.and_then(as_text).map(|e| e.to_lowercase()),
        provider,
        provider_id: id.and_then(as_text),
        name: name.and_then(as_text),
    }
}

/// 字符串原样返回，数字转为十进制字符串（Kakao 的 id 是数字）
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
