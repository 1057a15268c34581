//! movie-backend 服务入口

use std::sync::Arc;
use std::time::Duration;

use movie_adapter_email::{EmailClient, EmailTemplate};
use movie_adapter_postgres::run_migrations;
use movie_backend::api::http::{AppState, SessionCookie, build_router};
use movie_backend::application::{
    AccountRecoveryService, AuthService, MovieQueryService, SocialLoginService, UserService,
};
use movie_backend::domain::services::PasswordResetService;
use movie_backend::infrastructure::cache::CacheSessionRepository;
use movie_backend::infrastructure::mail::EmailResetPasswordMailer;
use movie_backend::infrastructure::oauth::HttpOAuth2Client;
use movie_backend::infrastructure::persistence::{
    PostgresMovieRepository, PostgresPasswordResetRepository, PostgresUserRepository,
};
use movie_ports::CachePort;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    movie_bootstrap::run_http("config", |ctx| async move {
        let config = ctx.infra.config().clone();
        let pool = ctx.infra.postgres_pool();

        run_migrations(&pool, &sqlx::migrate!("./migrations")).await?;

        // Repositories
        let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));
        let password_reset_repo = Arc::new(PostgresPasswordResetRepository::new(pool.clone()));
        let movie_repo = Arc::new(PostgresMovieRepository::new(pool));
        let cache: Arc<dyn CachePort> = Arc::new(ctx.infra.redis_cache());
        let session_repo = Arc::new(CacheSessionRepository::new(cache.clone()));

        // 外部端口
        let email_client = Arc::new(EmailClient::new(&config.email)?);
        let templates = Arc::new(EmailTemplate::builtin()?);
        let mailer = Arc::new(EmailResetPasswordMailer::new(email_client, templates));
        let oauth_client = Arc::new(HttpOAuth2Client::new(&config.oauth2)?);

        // 服务
        let user_service = Arc::new(UserService::new(user_repo.clone()));
        let password_reset = Arc::new(PasswordResetService::new(
            password_reset_repo,
            user_repo.clone(),
            config.password_reset.clone(),
        ));
        let account_recovery = Arc::new(AccountRecoveryService::new(
            user_service.clone(),
            password_reset.clone(),
            mailer,
            config.password_reset.reset_link_base_url.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            session_repo,
            Duration::from_secs(config.session.timeout_secs),
        ));
        let social_login = Arc::new(SocialLoginService::new(
            user_repo,
            auth_service.clone(),
            oauth_client,
            cache,
            config.oauth2.clone(),
        ));
        let movie_query = Arc::new(MovieQueryService::new(movie_repo));

        let removed = password_reset.cleanup_expired_tokens().await?;
        info!(removed, "Startup cleanup of expired reset tokens");

        let state = AppState {
            user_service,
            account_recovery,
            auth_service,
            social_login,
            movie_query,
            session_cookie: SessionCookie::from_config(&config.session),
            readiness: ctx.infra.clone(),
            metrics: ctx.metrics,
        };

        Ok(build_router(state, &config.server))
    })
    .await
}
