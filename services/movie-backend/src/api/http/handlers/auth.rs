//! 登录、注销、当前用户、社交注册补充信息

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use crate::api::http::AppState;
use crate::api::http::response::{NO_CACHE_HEADERS, error_body, failure, success};
use crate::api::http::session::load_session;
use crate::error::AuthError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub login_id: String,
    pub password: String,
}

/// POST /api/user-login
pub async fn user_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Response {
    match state.auth_service.login(&req.login_id, &req.password).await {
        Ok(result) => {
            let jar = state.session_cookie.issue(jar, &result.session.id);
            (
                jar,
                Json(json!({
                    "success": true,
                    "message": "Login successful.",
                    "user": result.user,
                })),
            )
                .into_response()
        }
        Err(e) => {
            if !e.is_client_error() {
                error!(error = %e, "Login failed unexpectedly");
            }
            failure(
                StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials.to_string(),
            )
        }
    }
}

/// POST /api/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let session_id = state.session_cookie.read(&jar);
    if let Err(e) = state.auth_service.logout(session_id.as_ref()).await {
        warn!(error = %e, "Failed to destroy session");
    }

    let jar = state.session_cookie.expire(jar);
    (jar, success("Logged out.")).into_response()
}

/// GET /api/current-user
pub async fn current_user(State(state): State<AppState>, jar: CookieJar) -> Response {
    let resolved = match load_session(&state, &jar).await {
        Ok(session) => state.auth_service.current_user(session.as_ref()).await,
        Err(e) => Err(e),
    };

    match resolved {
        Ok(Some(user)) => (
            NO_CACHE_HEADERS,
            Json(json!({ "success": true, "user": user })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            NO_CACHE_HEADERS,
            Json(json!({ "success": false, "message": AuthError::NotAuthenticated.to_string() })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to resolve current user");
            (
                StatusCode::BAD_REQUEST,
                NO_CACHE_HEADERS,
                Json(json!({
                    "success": false,
                    "message": format!("Failed to load user information: {}", e.message()),
                })),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SocialJoinCompleteRequest {
    pub nickname: Option<String>,
    pub agree: Option<bool>,
}

/// POST /api/social-join-complete
pub async fn social_join_complete(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SocialJoinCompleteRequest>,
) -> Response {
    let session = match load_session(&state, &jar).await {
        Ok(session) => session,
        Err(e) => return error_body(&e),
    };

    match state
        .user_service
        .complete_social_join(session.as_ref(), req.nickname.as_deref(), req.agree)
        .await
    {
        Ok(outcome) => Json(json!({
            "success": outcome.is_success(),
            "message": outcome.message(),
        }))
        .into_response(),
        Err(e) => error_body(&e),
    }
}
