//! movie-backend - 用户、认证、密码重置与电影查询服务

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
