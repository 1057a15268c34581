//! 电影查询接口

use axum::Json;
use axum::extract::{Path, Query, State};
use movie_errors::AppResult;
use serde::Deserialize;

use crate::api::http::AppState;
use crate::domain::entities::{GenreCount, MovieDetail};

/// GET /api/movies/{movie_cd}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_cd): Path<String>,
) -> AppResult<Json<MovieDetail>> {
    Ok(Json(state.movie_query.get_movie(&movie_cd).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub name: String,
    #[serde(default)]
    pub ignore_case: bool,
}

/// GET /api/movies/search?name=&ignoreCase=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<MovieDetail>>> {
    let movies = state
        .movie_query
        .search_by_name(&params.name, params.ignore_case)
        .await?;
    Ok(Json(movies))
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: String,
}

/// GET /api/movies?status=
pub async fn list_by_status(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> AppResult<Json<Vec<MovieDetail>>> {
    Ok(Json(state.movie_query.list_by_status(&params.status).await?))
}

#[derive(Debug, Deserialize)]
pub struct GenreParams {
    pub genre: String,
    #[serde(default)]
    pub exact: bool,
}

/// GET /api/movies/genres?genre=&exact=
pub async fn by_genre(
    State(state): State<AppState>,
    Query(params): Query<GenreParams>,
) -> AppResult<Json<Vec<MovieDetail>>> {
    let movies = state
        .movie_query
        .search_by_genre(&params.genre, params.exact)
        .await?;
    Ok(Json(movies))
}

/// GET /api/movies/genres/duplicates
pub async fn duplicate_genres(State(state): State<AppState>) -> AppResult<Json<Vec<GenreCount>>> {
    Ok(Json(state.movie_query.duplicate_genres().await?))
}
