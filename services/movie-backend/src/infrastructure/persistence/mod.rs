//! PostgreSQL 持久化

mod postgres_movie_repository;
mod postgres_password_reset_repository;
mod postgres_user_repository;

pub use postgres_movie_repository::PostgresMovieRepository;
pub use postgres_password_reset_repository::PostgresPasswordResetRepository;
pub use postgres_user_repository::PostgresUserRepository;
