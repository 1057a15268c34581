//! PostgreSQL 用户 Repository 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use movie_common::{AuditInfo, UserId};
use movie_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::{Provider, Role, User};
use crate::domain::repositories::UserRepository;
use crate::domain::value_objects::{Email, HashedPassword, LoginId, Nickname};

const USER_COLUMNS: &str = "id, login_id, email, nickname, password_hash, role, provider, \
     provider_id, social_join_completed, created_at, updated_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, condition: &str, value: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, condition);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists(&self, condition: &str, value: &str) -> AppResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM users WHERE {})", condition);
        let (exists,): (bool,) = sqlx::query_as(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check user existence: {}", e)))?;
        Ok(exists)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_login_id(&self, login_id: &str) -> AppResult<Option<User>> {
        self.find_one("login_id = $1", login_id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_one("email = $1", email).await
    }

    async fn find_by_provider(
        &self,
        provider: Provider,
        provider_id: &str,
    ) -> AppResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE provider = $1 AND provider_id = $2",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(provider.as_str())
            .bind(provider_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user by provider: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_login_id(&self, login_id: &str) -> AppResult<bool> {
        self.exists("login_id = $1", login_id).await
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        self.exists("email = $1", email).await
    }

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool> {
        self.exists("nickname = $1", nickname).await
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, login_id, email, nickname, password_hash, role, provider,
                provider_id, social_join_completed, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id.0)
        .bind(user.login_id.as_str())
        .bind(user.email.as_str())
        .bind(user.nickname_str())
        .bind(user.password_hash.as_ref().map(HashedPassword::as_str))
        .bind(user.role.as_str())
        .bind(user.provider.as_str())
        .bind(user.provider_id.as_deref())
        .bind(user.social_join_completed)
        .bind(user.audit_info.created_at)
        .bind(user.audit_info.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                warn!(constraint = ?db.constraint(), "Duplicate user");
                AppError::conflict("User already exists.")
            }
            _ => AppError::database(format!("Failed to save user: {}", e)),
        })?;

        debug!(user_id = %user.id, "User saved");
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, nickname = $3, password_hash = $4, role = $5,
                social_join_completed = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(user.nickname_str())
        .bind(user.password_hash.as_ref().map(HashedPassword::as_str))
        .bind(user.role.as_str())
        .bind(user.social_join_completed)
        .bind(user.audit_info.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("This nickname is already in use.")
            }
            _ => AppError::database(format!("Failed to update user: {}", e)),
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {} not found", user.id)));
        }

        debug!(user_id = %user.id, "User updated");
        Ok(())
    }
}

// 数据库行映射
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    login_id: String,
    email: String,
    nickname: Option<String>,
    password_hash: Option<String>,
    role: String,
    provider: String,
    provider_id: Option<String>,
    social_join_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AppResult<User> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| AppError::database(format!("Invalid role in users row: {}", e)))?;
        let provider = self
            .provider
            .parse::<Provider>()
            .map_err(|e| AppError::database(format!("Invalid provider in users row: {}", e)))?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            login_id: LoginId::from_trusted(self.login_id),
            email: Email::from_trusted(self.email),
            nickname: self.nickname.map(Nickname::from_trusted),
            password_hash: self.password_hash.map(HashedPassword::from_hash),
            role,
            provider,
            provider_id: self.provider_id,
            social_join_completed: self.social_join_completed,
            audit_info: AuditInfo::restore(self.created_at, self.updated_at),
        })
    }
}
