//! HTTP 处理函数

pub mod account;
pub mod auth;
pub mod health;
pub mod movie;
pub mod oauth;
pub mod user;
