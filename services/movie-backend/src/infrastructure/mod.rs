//! 基础设施层实现

pub mod cache;
pub mod mail;
pub mod oauth;
pub mod persistence;
