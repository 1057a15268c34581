//! 服务内错误类型
//!
//! 业务错误先用 thiserror 枚举描述，在边界处统一转换为 `AppError`

use movie_errors::AppError;
use thiserror::Error;

use crate::domain::value_objects::{EmailError, LoginIdError, NicknameError};

/// 用户相关错误
#[derive(Debug, Error)]
pub enum UserError {
    #[error("This login ID is already in use.")]
    DuplicateLoginId,

    #[error("This email is already registered.")]
    DuplicateEmail,

    #[error("This nickname is already in use.")]
    DuplicateNickname,
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateLoginId
            | UserError::DuplicateEmail
            | UserError::DuplicateNickname => AppError::conflict(err.to_string()),
        }
    }
}

/// 认证相关错误
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid login ID or password.")]
    InvalidCredentials,

    #[error("Login required.")]
    NotAuthenticated,

    #[error("Unsupported OAuth2 provider: {0}")]
    UnsupportedProvider(String),

    #[error("Invalid or expired OAuth2 state.")]
    InvalidState,

    #[error("Social login information is incomplete.")]
    IncompleteAttributes,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::NotAuthenticated
            | AuthError::InvalidState => AppError::unauthenticated(err.to_string()),
            AuthError::UnsupportedProvider(_) => AppError::not_found(err.to_string()),
            AuthError::IncompleteAttributes => AppError::validation(err.to_string()),
        }
    }
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<LoginIdError> for AppError {
    fn from(err: LoginIdError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<NicknameError> for AppError {
    fn from(err: NicknameError) -> Self {
        AppError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_mapping() {
        let err: AppError = UserError::DuplicateEmail.into();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.message(), "This email is already registered.");

        let err: AppError = UserError::DuplicateNickname.into();
        assert!(err.is_client_error());
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_auth_error_mapping() {
        let err: AppError = AuthError::InvalidCredentials.into();
        assert_eq!(err.status_code(), 401);

        let err: AppError = AuthError::UnsupportedProvider("github".into()).into();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_reserved_login_id_is_validation_error() {
        let err: AppError = LoginIdError::ReservedPrefix.into();
        assert_eq!(err.status_code(), 400);
    }
}
