//! 注册、重复检查与昵称推荐

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movie_errors::AppResult;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::api::http::AppState;
use crate::api::http::response::failure;
use crate::application::dto::JoinCommand;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinRequest {
    pub login_id: String,
    pub password: String,
    pub password_confirm: String,
    pub email: String,
    pub nickname: String,
}

/// POST /api/users/join
pub async fn join(State(state): State<AppState>, Json(req): Json<JoinRequest>) -> Response {
    info!(login_id = %req.login_id, "Join requested");

    let cmd = JoinCommand {
        login_id: req.login_id,
        password: req.password,
        password_confirm: req.password_confirm,
        email: req.email,
        nickname: req.nickname,
    };

    match state.user_service.join(cmd).await {
        Ok(user) => Json(json!({
            "success": true,
            "message": "Sign-up completed.",
            "nickname": user.nickname_str(),
            "loginId": user.login_id.as_str(),
            "email": user.email.as_str(),
            "redirect": "/login",
        }))
        .into_response(),
        Err(e) if e.is_client_error() => failure(StatusCode::BAD_REQUEST, e.message()),
        Err(e) => {
            error!(error = %e, "Join failed unexpectedly");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred during sign-up.",
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginIdParams {
    #[serde(rename = "loginId")]
    pub login_id: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailParams {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct NicknameParams {
    pub nickname: String,
}

fn duplicate_body(duplicate: bool, subject: &str) -> Json<Value> {
    let message = if duplicate {
        format!("This {} is already in use.", subject)
    } else {
        format!("This {} is available.", subject)
    };
    Json(json!({
        "duplicate": duplicate,
        "available": !duplicate,
        "message": message,
    }))
}

/// GET /api/users/check-login-id
pub async fn check_login_id(
    State(state): State<AppState>,
    Query(params): Query<LoginIdParams>,
) -> AppResult<Json<Value>> {
    let duplicate = state
        .user_service
        .check_login_id_duplicate(&params.login_id)
        .await?;
    Ok(duplicate_body(duplicate, "login ID"))
}

/// GET /api/users/check-email
pub async fn check_email(
    State(state): State<AppState>,
    Query(params): Query<EmailParams>,
) -> AppResult<Json<Value>> {
    let duplicate = state
        .user_service
        .check_email_duplicate(&params.email)
        .await?;
    Ok(duplicate_body(duplicate, "email"))
}

/// GET /api/users/check-nickname
pub async fn check_nickname(
    State(state): State<AppState>,
    Query(params): Query<NicknameParams>,
) -> AppResult<Json<Value>> {
    let duplicate = state
        .user_service
        .check_nickname_duplicate(&params.nickname)
        .await?;
    Ok(duplicate_body(duplicate, "nickname"))
}

/// GET /api/users/recommend-nickname
pub async fn recommend_nickname(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let nicknames = state.user_service.recommend_nicknames().await?;
    Ok(Json(json!({ "nicknames": nicknames })))
}
