//! 领域服务

mod nickname_generator;
mod password_reset_service;

pub use nickname_generator::*;
pub use password_reset_service::*;
