//! 值对象

mod email;
mod login_id;
mod nickname;
mod password;

pub use email::*;
pub use login_id::*;
pub use nickname::*;
pub use password::*;
