//! OAuth2 提供方客户端

mod http_oauth2_client;

pub use http_oauth2_client::{HttpOAuth2Client, extract_attributes};
