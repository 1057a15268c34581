//! 电影查询

use std::sync::Arc;

use movie_errors::{AppError, AppResult};

use crate::domain::entities::{GenreCount, MovieDetail, MovieStatus};
use crate::domain::repositories::MovieRepository;

pub struct MovieQueryService {
    movie_repo: Arc<dyn MovieRepository>,
}

impl MovieQueryService {
    pub fn new(movie_repo: Arc<dyn MovieRepository>) -> Self {
        Self { movie_repo }
    }

    pub async fn get_movie(&self, movie_cd: &str) -> AppResult<MovieDetail> {
        self.movie_repo
            .find_by_movie_cd(movie_cd)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Movie {} not found", movie_cd)))
    }

    /// 按片名搜索；区分大小写时只返回第一条匹配
    pub async fn search_by_name(
        &self,
        name: &str,
        ignore_case: bool,
    ) -> AppResult<Vec<MovieDetail>> {
        let name = non_blank(name, "name")?;
        if ignore_case {
            self.movie_repo
                .find_by_movie_nm_containing_ignore_case(name)
                .await
        } else {
            Ok(self
                .movie_repo
                .find_by_movie_nm_containing(name)
                .await?
                .into_iter()
                .collect())
        }
    }

    pub async fn list_by_status(&self, status: &str) -> AppResult<Vec<MovieDetail>> {
        let status = status
            .parse::<MovieStatus>()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.movie_repo.find_by_status(status).await
    }

    pub async fn search_by_genre(&self, genre: &str, exact: bool) -> AppResult<Vec<MovieDetail>> {
        let genre = non_blank(genre, "genre")?;
        if exact {
            self.movie_repo.find_by_exact_genre_nm(genre).await
        } else {
            self.movie_repo.find_by_genre_nm_containing(genre).await
        }
    }

    pub async fn duplicate_genres(&self) -> AppResult<Vec<GenreCount>> {
        self.movie_repo.find_duplicate_genres().await
    }
}

fn non_blank<'a>(value: &'a str, field: &str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{} must not be empty", field)));
    }
    Ok(value)
}
