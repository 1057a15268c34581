//! PostgreSQL 密码重置令牌仓储实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use movie_common::{ResetTokenId, UserId};
use movie_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::PasswordResetToken;
use crate::domain::repositories::PasswordResetRepository;

pub struct PostgresPasswordResetRepository {
    pool: PgPool,
}

impl PostgresPasswordResetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasswordResetRepository for PostgresPasswordResetRepository {
    async fn save(&self, token: &PasswordResetToken) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (
                id, user_id, email, token_hash, expires_at, used, used_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(token.id.0)
        .bind(token.user_id.0)
        .bind(&token.email)
        .bind(&token.token_hash)
        .bind(token.expires_at)
        .bind(token.used)
        .bind(token.used_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save password reset token: {}", e)))?;

        debug!(token_id = %token.id, user_id = %token.user_id, "Password reset token saved");
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<PasswordResetToken>> {
        let row = sqlx::query_as::<_, PasswordResetTokenRow>(
            r#"
            SELECT id, user_id, email, token_hash, expires_at, used, used_at, created_at
            FROM password_reset_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to find password reset token by hash: {}", e))
        })?;

        Ok(row.map(Into::into))
    }

    async fn claim_valid_token(&self, token_hash: &str) -> AppResult<Option<PasswordResetToken>> {
        // 单条 UPDATE 完成检查与标记，并发请求中只有一个能拿到行
        let row = sqlx::query_as::<_, PasswordResetTokenRow>(
            r#"
            UPDATE password_reset_tokens
            SET used = TRUE, used_at = NOW()
            WHERE token_hash = $1 AND used = FALSE AND expires_at > NOW()
            RETURNING id, user_id, email, token_hash, expires_at, used, used_at, created_at
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to claim password reset token: {}", e))
        })?;

        if let Some(row) = &row {
            debug!(token_id = %row.id, "Password reset token claimed");
        }
        Ok(row.map(Into::into))
    }

    async fn count_active_by_user_id(&self, user_id: &UserId) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM password_reset_tokens
            WHERE user_id = $1 AND used = FALSE AND expires_at > NOW()
            "#,
        )
        .bind(user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to count active password reset tokens: {}", e))
        })?;

        Ok(count)
    }

    async fn invalidate_by_user_id(&self, user_id: &UserId) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE password_reset_tokens
            SET used = TRUE, used_at = NOW()
            WHERE user_id = $1 AND used = FALSE
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to invalidate password reset tokens: {}", e))
        })?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM password_reset_tokens WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to delete expired password reset tokens: {}",
                    e
                ))
            })?;

        let count = result.rows_affected();
        debug!(count, "Expired password reset tokens deleted");
        Ok(count)
    }
}

// 数据库行映射
#[derive(sqlx::FromRow)]
struct PasswordResetTokenRow {
    id: Uuid,
    user_id: Uuid,
    email: String,
    token_hash: String,
    expires_at: DateTime<Utc>,
    used: bool,
    used_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<PasswordResetTokenRow> for PasswordResetToken {
    fn from(row: PasswordResetTokenRow) -> Self {
        Self {
            id: ResetTokenId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            email: row.email,
            token_hash: row.token_hash,
            expires_at: row.expires_at,
            used: row.used,
            used_at: row.used_at,
            created_at: row.created_at,
        }
    }
}
