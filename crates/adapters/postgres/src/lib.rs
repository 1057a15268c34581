//! movie-adapter-postgres - PostgreSQL 适配器

mod connection;
mod migration;
mod pattern;

pub use connection::*;
pub use migration::*;
pub use pattern::*;
