//! 会话 Cookie

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use movie_common::SessionId;
use movie_config::SessionConfig;
use movie_errors::AppResult;

use crate::api::http::AppState;
use crate::domain::entities::SessionData;

/// 会话 Cookie 的名称与属性（HttpOnly、SameSite=Lax、Path=/）
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.cookie_name.clone(), config.cookie_secure)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 读取请求中的会话 ID
    pub fn read(&self, jar: &CookieJar) -> Option<SessionId> {
        jar.get(&self.name)
            .map(|c| c.value().trim())
            .filter(|v| !v.is_empty())
            .map(|v| SessionId(v.to_string()))
    }

    /// 写入会话 Cookie
    pub fn issue(&self, jar: CookieJar, id: &SessionId) -> CookieJar {
        jar.add(
            Cookie::build((self.name.clone(), id.as_str().to_string()))
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(self.secure)
                .path("/"),
        )
    }

    /// 让浏览器删除会话 Cookie
    pub fn expire(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build((self.name.clone(), "")).path("/"))
    }
}

/// 根据 Cookie 加载会话（同时刷新超时）
pub async fn load_session(state: &AppState, jar: &CookieJar) -> AppResult<Option<SessionData>> {
    match state.session_cookie.read(jar) {
        Some(id) => state.auth_service.load_session(&id).await,
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_read() {
        let cookie = SessionCookie::new("MOVIE_SESSION", false);
        let id = SessionId("abc123".to_string());
        let jar = cookie.issue(CookieJar::new(), &id);

        assert_eq!(cookie.read(&jar), Some(id));
        let raw = jar.get("MOVIE_SESSION").unwrap();
        assert_eq!(raw.http_only(), Some(true));
        assert_eq!(raw.path(), Some("/"));
    }

    #[test]
    fn test_blank_cookie_ignored() {
        let cookie = SessionCookie::new("MOVIE_SESSION", false);
        let jar = CookieJar::new().add(Cookie::new("MOVIE_SESSION", " "));
        assert!(cookie.read(&jar).is_none());
    }
}
