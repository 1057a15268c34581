//! HTTP JSON 接口

pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod session;
pub mod state;

pub use router::build_router;
pub use session::SessionCookie;
pub use state::{AppState, ReadinessProbe};
