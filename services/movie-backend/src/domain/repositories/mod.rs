//! Repository trait 定义

mod movie_repository;
mod password_reset_repository;
mod session_repository;
mod user_repository;

pub use movie_repository::*;
pub use password_reset_repository::*;
pub use session_repository::*;
pub use user_repository::*;
