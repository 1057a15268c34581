//! PostgreSQL 电影详情查询
//!
//! 子串查询使用 `contains_pattern` 转义 LIKE 元字符，输入按字面匹配

use async_trait::async_trait;
use movie_adapter_postgres::contains_pattern;
use movie_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::{GenreCount, MovieDetail, MovieStatus};
use crate::domain::repositories::MovieRepository;

const MOVIE_COLUMNS: &str = "movie_cd, movie_nm, genre_nm, status";

pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self, condition: &str, value: &str) -> AppResult<Vec<MovieDetail>> {
        let sql = format!(
            "SELECT {} FROM movie_detail WHERE {} ORDER BY movie_cd",
            MOVIE_COLUMNS, condition
        );
        let rows = sqlx::query_as::<_, MovieDetailRow>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query movies: {}", e)))?;

        rows.into_iter().map(MovieDetailRow::into_movie).collect()
    }

    async fn fetch_first(&self, condition: &str, value: &str) -> AppResult<Option<MovieDetail>> {
        let sql = format!(
            "SELECT {} FROM movie_detail WHERE {} ORDER BY movie_cd LIMIT 1",
            MOVIE_COLUMNS, condition
        );
        let row = sqlx::query_as::<_, MovieDetailRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query movie: {}", e)))?;

        row.map(MovieDetailRow::into_movie).transpose()
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn find_by_movie_cd(&self, movie_cd: &str) -> AppResult<Option<MovieDetail>> {
        self.fetch_first("movie_cd = $1", movie_cd).await
    }

    async fn find_by_movie_nm_containing(&self, fragment: &str) -> AppResult<Option<MovieDetail>> {
        self.fetch_first("movie_nm LIKE $1", &contains_pattern(fragment))
            .await
    }

    async fn find_by_status(&self, status: MovieStatus) -> AppResult<Vec<MovieDetail>> {
        self.fetch_all("status = $1", status.as_str()).await
    }

    async fn find_by_movie_nm_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> AppResult<Vec<MovieDetail>> {
        self.fetch_all("movie_nm ILIKE $1", &contains_pattern(fragment))
            .await
    }

    async fn find_by_genre_nm_containing(&self, fragment: &str) -> AppResult<Vec<MovieDetail>> {
        self.fetch_all("genre_nm LIKE $1", &contains_pattern(fragment))
            .await
    }

    async fn find_duplicate_genres(&self) -> AppResult<Vec<GenreCount>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT genre_nm, COUNT(*) AS cnt
            FROM movie_detail
            WHERE genre_nm IS NOT NULL
            GROUP BY genre_nm
            HAVING COUNT(*) > 1
            ORDER BY cnt DESC, genre_nm
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query duplicate genres: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(genre_nm, count)| GenreCount { genre_nm, count })
            .collect())
    }

    async fn find_by_exact_genre_nm(&self, genre_nm: &str) -> AppResult<Vec<MovieDetail>> {
        self.fetch_all("genre_nm = $1", genre_nm).await
    }
}

#[derive(sqlx::FromRow)]
struct MovieDetailRow {
    movie_cd: String,
    movie_nm: String,
    genre_nm: Option<String>,
    status: String,
}

impl MovieDetailRow {
    fn into_movie(self) -> AppResult<MovieDetail> {
        let status = self
            .status
            .parse::<MovieStatus>()
            .map_err(|e| AppError::database(format!("Invalid movie status: {}", e)))?;

        Ok(MovieDetail {
            movie_cd: self.movie_cd,
            movie_nm: self.movie_nm,
            genre_nm: self.genre_nm,
            status,
        })
    }
}
