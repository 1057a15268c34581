//! OAuth2 授权跳转与回调

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use movie_errors::AppResult;
use serde::Deserialize;
use tracing::warn;

use crate::api::http::AppState;
use crate::api::http::response::found;

/// GET /oauth2/authorization/{provider}
pub async fn authorize(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> AppResult<Response> {
    let url = state.social_login.authorization_url(&provider).await?;
    Ok(found(&url))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET /login/oauth2/code/{provider}
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
) -> Response {
    let failure_redirect = state.social_login.failure_redirect().to_string();

    let (Some(code), Some(oauth_state)) = (params.code, params.state) else {
        warn!(provider = %provider, error = ?params.error, "OAuth2 callback without code or state");
        return found(&failure_redirect);
    };

    match state
        .social_login
        .complete_login(&provider, &code, &oauth_state)
        .await
    {
        Ok(result) => {
            let jar = state.session_cookie.issue(jar, &result.session.id);
            (jar, found(&result.redirect)).into_response()
        }
        Err(e) => {
            warn!(provider = %provider, error = %e, "OAuth2 login failed");
            found(&failure_redirect)
        }
    }
}
