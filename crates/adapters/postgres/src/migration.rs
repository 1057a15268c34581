//! 数据库迁移

use movie_errors::{AppError, AppResult};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

/// 执行内嵌的迁移脚本（由服务通过 `sqlx::migrate!` 提供）
pub async fn run_migrations(pool: &PgPool, migrator: &Migrator) -> AppResult<()> {
    let pending = migrator.iter().count();
    migrator
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to run migrations: {}", e)))?;

    info!(migrations = pending, "Database migrations applied");
    Ok(())
}
