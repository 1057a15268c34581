//! 领域实体

mod movie_detail;
mod password_reset_token;
mod session;
mod user;

pub use movie_detail::*;
pub use password_reset_token::*;
pub use session::*;
pub use user::*;
