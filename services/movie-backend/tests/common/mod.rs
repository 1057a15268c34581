//! 集成测试公共设施：内存仓储、内存缓存、mock 端口与路由构建
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::Utc;
use mockall::mock;
use movie_backend::api::http::{AppState, ReadinessProbe, SessionCookie, build_router};
use movie_backend::application::ports::{OAuth2Client, ResetPasswordMailer};
use movie_backend::application::{
    AccountRecoveryService, AuthService, MovieQueryService, SocialLoginService, UserService,
};
use movie_backend::domain::entities::{
    GenreCount, MovieDetail, MovieStatus, OAuth2Attributes, PasswordResetToken, Provider,
    SessionData, User,
};
use movie_backend::domain::repositories::{
    MovieRepository, PasswordResetRepository, UserRepository,
};
use movie_backend::domain::services::PasswordResetService;
use movie_backend::domain::value_objects::{Email, HashedPassword, LoginId, Nickname};
use movie_backend::infrastructure::cache::CacheSessionRepository;
use movie_common::UserId;
use movie_config::{OAuth2Config, PasswordResetConfig, ServerConfig};
use movie_errors::{AppError, AppResult};
use movie_ports::CachePort;
use movie_telemetry::HealthStatus;
use serde_json::Value;
use tower::ServiceExt;

pub const COOKIE_NAME: &str = "MOVIE_SESSION";

// ---------------------------------------------------------------------------
// 内存仓储
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn by_email(&self, email: &str) -> Option<User> {
        self.all().into_iter().find(|u| u.email.as_str() == email)
    }

    fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| pred(u)).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.find(|u| &u.id == id))
    }

    async fn find_by_login_id(&self, login_id: &str) -> AppResult<Option<User>> {
        Ok(self.find(|u| u.login_id.as_str() == login_id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.find(|u| u.email.as_str() == email))
    }

    async fn find_by_provider(
        &self,
        provider: Provider,
        provider_id: &str,
    ) -> AppResult<Option<User>> {
        Ok(self.find(|u| u.provider == provider && u.provider_id.as_deref() == Some(provider_id)))
    }

    async fn exists_by_login_id(&self, login_id: &str) -> AppResult<bool> {
        Ok(self.find(|u| u.login_id.as_str() == login_id).is_some())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.find(|u| u.email.as_str() == email).is_some())
    }

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool> {
        Ok(self.find(|u| u.nickname_str() == Some(nickname)).is_some())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        // 与数据库唯一索引保持一致
        if users
            .iter()
            .any(|u| u.login_id == user.login_id || u.email == user.email)
        {
            return Err(AppError::conflict("duplicate user"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::not_found("user")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryPasswordResetRepository {
    tokens: Mutex<Vec<PasswordResetToken>>,
}

impl InMemoryPasswordResetRepository {
    pub fn all(&self) -> Vec<PasswordResetToken> {
        self.tokens.lock().unwrap().clone()
    }

    /// 让所有令牌立即过期
    pub fn expire_all(&self) {
        for token in self.tokens.lock().unwrap().iter_mut() {
            token.expires_at = Utc::now() - chrono::Duration::minutes(1);
        }
    }
}

#[async_trait]
impl PasswordResetRepository for InMemoryPasswordResetRepository {
    async fn save(&self, token: &PasswordResetToken) -> AppResult<()> {
        self.tokens.lock().unwrap().push(token.clone());
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<PasswordResetToken>> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token_hash == token_hash)
            .cloned())
    }

    async fn claim_valid_token(&self, token_hash: &str) -> AppResult<Option<PasswordResetToken>> {
        let mut tokens = self.tokens.lock().unwrap();
        Ok(tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && t.is_valid())
            .map(|t| {
                t.mark_as_used();
                t.clone()
            }))
    }

    async fn count_active_by_user_id(&self, user_id: &UserId) -> AppResult<i64> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.user_id == user_id && t.is_valid())
            .count() as i64)
    }

    async fn invalidate_by_user_id(&self, user_id: &UserId) -> AppResult<u64> {
        let mut count = 0;
        for token in self.tokens.lock().unwrap().iter_mut() {
            if &token.user_id == user_id && !token.used {
                token.mark_as_used();
                count += 1;
            }
        }
        Ok(count)
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| !t.is_expired());
        Ok((before - tokens.len()) as u64)
    }
}

/// 内存电影仓储，查询语义与 SQL 实现一致（按电影代码排序）
pub struct InMemoryMovieRepository {
    movies: Vec<MovieDetail>,
}

impl InMemoryMovieRepository {
    pub fn new(mut movies: Vec<MovieDetail>) -> Self {
        movies.sort_by(|a, b| a.movie_cd.cmp(&b.movie_cd));
        Self { movies }
    }

    fn filter(&self, pred: impl Fn(&MovieDetail) -> bool) -> Vec<MovieDetail> {
        self.movies.iter().filter(|m| pred(m)).cloned().collect()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn find_by_movie_cd(&self, movie_cd: &str) -> AppResult<Option<MovieDetail>> {
        Ok(self.filter(|m| m.movie_cd == movie_cd).into_iter().next())
    }

    async fn find_by_movie_nm_containing(&self, fragment: &str) -> AppResult<Option<MovieDetail>> {
        Ok(self
            .filter(|m| m.movie_nm.contains(fragment))
            .into_iter()
            .next())
    }

    async fn find_by_status(&self, status: MovieStatus) -> AppResult<Vec<MovieDetail>> {
        Ok(self.filter(|m| m.status == status))
    }

    async fn find_by_movie_nm_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> AppResult<Vec<MovieDetail>> {
        let fragment = fragment.to_lowercase();
        Ok(self.filter(|m| m.movie_nm.to_lowercase().contains(&fragment)))
    }

    async fn find_by_genre_nm_containing(&self, fragment: &str) -> AppResult<Vec<MovieDetail>> {
        Ok(self.filter(|m| m.genre_nm.as_deref().is_some_and(|g| g.contains(fragment))))
    }

    async fn find_duplicate_genres(&self) -> AppResult<Vec<GenreCount>> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for genre in self.movies.iter().filter_map(|m| m.genre_nm.clone()) {
            *counts.entry(genre).or_default() += 1;
        }
        let mut result: Vec<GenreCount> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(genre_nm, count)| GenreCount { genre_nm, count })
            .collect();
        result.sort_by(|a, b| b.count.cmp(&a.count).then(a.genre_nm.cmp(&b.genre_nm)));
        Ok(result)
    }

    async fn find_by_exact_genre_nm(&self, genre_nm: &str) -> AppResult<Vec<MovieDetail>> {
        Ok(self.filter(|m| m.genre_nm.as_deref() == Some(genre_nm)))
    }
}

/// 忽略 TTL 的内存缓存
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCache {
    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl CachePort for InMemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.entries.lock().unwrap().contains_key(key))
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> AppResult<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 端口替身
// ---------------------------------------------------------------------------

mock! {
    pub Mailer {}

    #[async_trait]
    impl ResetPasswordMailer for Mailer {
        async fn send_reset_password_email(
            &self,
            to: &str,
            user_name: &str,
            reset_link: &str,
            expires_in_minutes: i64,
        ) -> AppResult<()>;
    }
}

/// 接受任意调用的邮件 mock
pub fn any_mailer() -> MockMailer {
    let mut mailer = MockMailer::new();
    mailer
        .expect_send_reset_password_email()
        .returning(|_, _, _, _| Ok(()));
    mailer
}

/// 只支持 Google 的 OAuth2 客户端，授权码 `good-code` 返回固定属性
pub struct StubOAuth2Client {
    pub attributes: OAuth2Attributes,
}

impl StubOAuth2Client {
    pub fn google(provider_id: &str, email: Option<&str>) -> Self {
        Self {
            attributes: OAuth2Attributes {
                email: email.map(str::to_string),
                provider: Provider::Google,
                provider_id: Some(provider_id.to_string()),
                name: Some("Google User".to_string()),
            },
        }
    }
}

#[async_trait]
impl OAuth2Client for StubOAuth2Client {
    fn supports(&self, provider: Provider) -> bool {
        provider == Provider::Google
    }

    fn authorization_url(&self, provider: Provider, state: &str) -> AppResult<String> {
        Ok(format!(
            "https://accounts.example.com/{}?state={}",
            provider.as_str().to_lowercase(),
            state
        ))
    }

    async fn fetch_attributes(&self, _provider: Provider, code: &str) -> AppResult<OAuth2Attributes> {
        if code == "good-code" {
            Ok(self.attributes.clone())
        } else {
            Err(AppError::external_service("invalid_grant"))
        }
    }
}

pub struct AlwaysReady;

#[async_trait]
impl ReadinessProbe for AlwaysReady {
    async fn check(&self) -> HealthStatus {
        let mut status = HealthStatus::new();
        status.add_check("postgres", true, None);
        status.add_check("redis", true, None);
        status
    }
}

// ---------------------------------------------------------------------------
// 测试应用
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub tokens: Arc<InMemoryPasswordResetRepository>,
    pub cache: Arc<InMemoryCache>,
}

pub fn sample_movies() -> Vec<MovieDetail> {
    let movie = |cd: &str, nm: &str, genre: Option<&str>, status| MovieDetail {
        movie_cd: cd.to_string(),
        movie_nm: nm.to_string(),
        genre_nm: genre.map(str::to_string),
        status,
    };
    vec![
        movie("20190001", "Parasite", Some("Drama"), MovieStatus::Ended),
        movie("20230002", "Past Lives", Some("Drama"), MovieStatus::NowPlaying),
        movie("20240003", "Dune: Part Two", Some("Sci-Fi"), MovieStatus::NowPlaying),
        movie("20250004", "Dune Messiah", Some("Sci-Fi"), MovieStatus::ComingSoon),
        movie("20250005", "100% Wolf", Some("Animation"), MovieStatus::ComingSoon),
        movie("20250006", "Untitled", None, MovieStatus::ComingSoon),
    ]
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(any_mailer(), StubOAuth2Client::google("g-1", Some("g@example.com")))
    }

    pub fn with_mailer(mailer: MockMailer) -> Self {
        Self::build(mailer, StubOAuth2Client::google("g-1", Some("g@example.com")))
    }

    pub fn with_oauth2(client: StubOAuth2Client) -> Self {
        Self::build(any_mailer(), client)
    }

    fn build(mailer: MockMailer, oauth_client: StubOAuth2Client) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let tokens = Arc::new(InMemoryPasswordResetRepository::default());
        let cache = Arc::new(InMemoryCache::default());

        let user_repo: Arc<dyn UserRepository> = users.clone();
        let cache_port: Arc<dyn CachePort> = cache.clone();
        let session_repo = Arc::new(CacheSessionRepository::new(cache_port.clone()));

        let user_service = Arc::new(UserService::new(user_repo.clone()));
        let password_reset = Arc::new(PasswordResetService::new(
            tokens.clone(),
            user_repo.clone(),
            PasswordResetConfig::default(),
        ));
        let account_recovery = Arc::new(AccountRecoveryService::new(
            user_service.clone(),
            password_reset,
            Arc::new(mailer),
            "http://localhost:8080/reset-password",
        ));
        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            session_repo,
            Duration::from_secs(3600),
        ));
        let social_login = Arc::new(SocialLoginService::new(
            user_repo,
            auth_service.clone(),
            Arc::new(oauth_client),
            cache_port,
            OAuth2Config::default(),
        ));
        let movie_query = Arc::new(MovieQueryService::new(Arc::new(
            InMemoryMovieRepository::new(sample_movies()),
        )));

        let state = AppState {
            user_service,
            account_recovery,
            auth_service,
            social_login,
            movie_query,
            session_cookie: SessionCookie::new(COOKIE_NAME, false),
            readiness: Arc::new(AlwaysReady),
            metrics: None,
        };

        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
            cors_allowed_origins: vec![],
        };

        Self {
            router: build_router(state, &server),
            users,
            tokens,
            cache,
        }
    }

    /// 发送请求，返回状态码、响应头与 JSON（非 JSON 响应体为 Null）
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, HeaderMap, Value) {
        self.send(json_request("POST", uri, body, None)).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn seed_local_user(
        &self,
        login_id: &str,
        email: &str,
        nickname: &str,
        password: &str,
    ) -> User {
        let user = User::new_local(
            LoginId::new(login_id).unwrap(),
            Email::new(email).unwrap(),
            Nickname::new(nickname).unwrap(),
            HashedPassword::from_plain(password).unwrap(),
        );
        self.users.save(&user).await.unwrap();
        user
    }

    /// 直接写入已构造好的用户，绕过注册校验
    pub async fn seed_user(&self, user: User) -> User {
        self.users.save(&user).await.unwrap();
        user
    }

    pub async fn seed_social_user(
        &self,
        provider: Provider,
        provider_id: &str,
        email: &str,
    ) -> User {
        let user = User::new_social(provider, provider_id, Email::new(email).unwrap());
        self.users.save(&user).await.unwrap();
        user
    }

    /// 直接写入会话，返回 Cookie 头的值
    pub async fn seed_session(&self, session: &SessionData) -> String {
        self.cache
            .set(
                &format!("session:{}", session.id.as_str()),
                &serde_json::to_string(session).unwrap(),
                None,
            )
            .await
            .unwrap();
        format!("{}={}", COOKIE_NAME, session.id.as_str())
    }
}

pub fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn form_request(uri: &str, form: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

/// 从 Set-Cookie 头中取出 `name=value` 部分
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(COOKIE_NAME))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
