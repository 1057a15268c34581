//! 路由装配

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use movie_config::ServerConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api::http::AppState;
use crate::api::http::handlers::{account, auth, health, movie, oauth, user};

/// 请求体上限
const MAX_BODY_BYTES: usize = 1024 * 1024;

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/join", post(user::join))
        .route("/api/users/check-login-id", get(user::check_login_id))
        .route("/api/users/check-email", get(user::check_email))
        .route("/api/users/check-nickname", get(user::check_nickname))
        .route("/api/users/recommend-nickname", get(user::recommend_nickname))
        .route("/api/find-id", post(account::find_id))
        .route("/api/forgot-password", post(account::forgot_password))
        .route("/api/social-password-join", post(account::social_password_join))
        .route(
            "/api/reset-password/validate-token",
            post(account::validate_reset_token),
        )
        .route("/api/reset-password", post(account::reset_password))
        .route("/api/social-join-complete", post(auth::social_join_complete))
        .route("/api/logout", post(auth::logout))
        .route("/api/current-user", get(auth::current_user))
        .route("/api/user-login", post(auth::user_login))
}

fn oauth_routes() -> Router<AppState> {
    Router::new()
        .route("/oauth2/authorization/{provider}", get(oauth::authorize))
        .route("/login/oauth2/code/{provider}", get(oauth::callback))
}

fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/api/movies", get(movie::list_by_status))
        .route("/api/movies/search", get(movie::search))
        .route("/api/movies/genres", get(movie::by_genre))
        .route("/api/movies/genres/duplicates", get(movie::duplicate_genres))
        .route("/api/movies/{movie_cd}", get(movie::get_movie))
}

fn ops_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics))
}

/// 未配置来源时放开所有来源；配置后只允许列出的来源并携带 Cookie
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// 构建完整的应用路由
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(user_routes())
        .merge(oauth_routes())
        .merge(movie_routes())
        .merge(ops_routes())
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_allowed_origins))
}
