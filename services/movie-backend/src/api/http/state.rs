//! 路由共享状态

use std::sync::Arc;

use async_trait::async_trait;
use movie_bootstrap::{Infrastructure, MetricsRecorder};
use movie_telemetry::HealthStatus;

use crate::api::http::SessionCookie;
use crate::application::{
    AccountRecoveryService, AuthService, MovieQueryService, SocialLoginService, UserService,
};

/// 就绪检查
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    async fn check(&self) -> HealthStatus;
}

#[async_trait]
impl ReadinessProbe for Infrastructure {
    async fn check(&self) -> HealthStatus {
        self.health_status().await
    }
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub account_recovery: Arc<AccountRecoveryService>,
    pub auth_service: Arc<AuthService>,
    pub social_login: Arc<SocialLoginService>,
    pub movie_query: Arc<MovieQueryService>,
    pub session_cookie: SessionCookie,
    pub readiness: Arc<dyn ReadinessProbe>,
    pub metrics: Option<MetricsRecorder>,
}
