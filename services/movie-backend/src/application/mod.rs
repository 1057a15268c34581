//! 应用层：编排领域对象与端口

mod account_recovery_service;
mod auth_service;
pub mod dto;
mod movie_query_service;
pub mod ports;
mod social_login_service;
mod user_service;

pub use account_recovery_service::AccountRecoveryService;
pub use auth_service::AuthService;
pub use movie_query_service::MovieQueryService;
pub use social_login_service::SocialLoginService;
pub use user_service::UserService;
