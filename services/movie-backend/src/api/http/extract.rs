//! 请求参数提取
//!
//! 令牌类接口同时接受查询字符串与 `application/x-www-form-urlencoded` 表单，
//! 两处同名参数以表单为准

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::api::http::response::failure;

pub struct RequestParams<T>(pub T);

impl<S, T> FromRequest<S> for RequestParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut params: HashMap<String, String> = req
            .uri()
            .query()
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            params.extend(form_urlencoded::parse(&body).into_owned());
        }

        let value = serde_json::to_value(params)
            .map_err(|e| failure(StatusCode::BAD_REQUEST, e.to_string()))?;
        serde_json::from_value(value)
            .map(RequestParams)
            .map_err(|e| {
                failure(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid request parameters: {}", e),
                )
            })
    }
}
