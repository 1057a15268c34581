//! 基于 CachePort 的存储

mod cache_session_repository;

pub use cache_session_repository::CacheSessionRepository;
