//! domain-core - 领域核心 trait
//!
//! 实体与聚合根的最小抽象

mod entity;

pub use entity::*;

pub use movie_common::{AuditInfo, UserId};
