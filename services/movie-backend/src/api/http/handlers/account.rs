//! 找回 ID、忘记密码、社交账号设置密码、密码重置

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::api::http::AppState;
use crate::api::http::extract::RequestParams;
use crate::api::http::response::{bad_request_or_internal, error_body, failure, success};
use crate::application::dto::{FindIdOutcome, ForgotPasswordOutcome, SocialPasswordJoinCommand};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmailRequest {
    pub email: String,
}

/// POST /api/find-id
pub async fn find_id(State(state): State<AppState>, Json(req): Json<EmailRequest>) -> Response {
    match state.user_service.find_login_id(&req.email).await {
        Ok(outcome) => {
            let message = outcome.message();
            match outcome {
                FindIdOutcome::Found { masked_login_id } => Json(json!({
                    "success": true,
                    "maskedLoginId": masked_login_id,
                    "message": message,
                }))
                .into_response(),
                _ => failure(StatusCode::OK, message),
            }
        }
        Err(e) => error_body(&e),
    }
}

/// POST /api/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> Response {
    let outcome = match state.account_recovery.forgot_password(&req.email).await {
        Ok(outcome) => outcome,
        Err(e) => return error_body(&e),
    };

    let message = outcome.message();
    let body = match &outcome {
        ForgotPasswordOutcome::SocialOnly {
            provider,
            email,
            nickname,
        } => json!({
            "type": outcome.kind(),
            "provider": provider.as_str(),
            "email": email,
            "nickname": nickname,
            "message": message,
        }),
        ForgotPasswordOutcome::NotFound | ForgotPasswordOutcome::Normal => json!({
            "type": outcome.kind(),
            "message": message,
        }),
    };

    Json(body).into_response()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialPasswordJoinRequest {
    pub email: String,
    pub nickname: Option<String>,
    pub password: String,
    pub password_confirm: String,
}

/// POST /api/social-password-join
pub async fn social_password_join(
    State(state): State<AppState>,
    Json(req): Json<SocialPasswordJoinRequest>,
) -> Response {
    let cmd = SocialPasswordJoinCommand {
        email: req.email,
        nickname: req.nickname,
        password: req.password,
        password_confirm: req.password_confirm,
    };

    match state.user_service.set_social_password(cmd).await {
        Ok(outcome) => Json(json!({
            "success": outcome.is_success(),
            "message": outcome.message(),
        }))
        .into_response(),
        Err(e) => error_body(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenParams {
    pub token: String,
}

/// POST /api/reset-password/validate-token
pub async fn validate_reset_token(
    State(state): State<AppState>,
    RequestParams(params): RequestParams<TokenParams>,
) -> Response {
    match state
        .account_recovery
        .validate_reset_token(&params.token)
        .await
    {
        Ok(()) => success("The token is valid.").into_response(),
        Err(e) => bad_request_or_internal(&e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordParams {
    pub token: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// POST /api/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequestParams(params): RequestParams<ResetPasswordParams>,
) -> Response {
    match state
        .account_recovery
        .reset_password(
            &params.token,
            &params.new_password,
            &params.new_password_confirm,
        )
        .await
    {
        Ok(()) => {
            info!("Password reset via token");
            success("Your password has been changed.").into_response()
        }
        Err(e) => bad_request_or_internal(&e),
    }
}
