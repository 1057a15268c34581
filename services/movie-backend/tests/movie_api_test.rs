//! 电影查询接口测试

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::Value;

fn movie_codes(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|m| m["movieCd"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_get_movie() {
    let app = TestApp::new();

    let (status, _, body) = app.get("/api/movies/20190001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["movieNm"], "Parasite");
    assert_eq!(body["genreNm"], "Drama");
    assert_eq!(body["status"], "ENDED");

    let (status, _, _) = app.get("/api/movies/99999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_case_sensitive_returns_first_match() {
    let app = TestApp::new();

    let (status, _, body) = app.get("/api/movies/search?name=Dune").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(movie_codes(&body), vec!["20240003"]);

    let (_, _, body) = app.get("/api/movies/search?name=dune").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_ignore_case() {
    let app = TestApp::new();

    let (status, _, body) = app
        .get("/api/movies/search?name=dune&ignoreCase=true")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(movie_codes(&body), vec!["20240003", "20250004"]);

    // LIKE 通配符按字面匹配
    let (_, _, body) = app
        .get("/api/movies/search?name=100%25&ignoreCase=true")
        .await;
    assert_eq!(movie_codes(&body), vec!["20250005"]);
}

#[tokio::test]
async fn test_search_blank_name() {
    let app = TestApp::new();
    let (status, _, _) = app.get("/api/movies/search?name=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_by_status() {
    let app = TestApp::new();

    let (status, _, body) = app.get("/api/movies?status=NOW_PLAYING").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(movie_codes(&body), vec!["20230002", "20240003"]);

    let (_, _, body) = app.get("/api/movies?status=coming_soon").await;
    assert_eq!(movie_codes(&body).len(), 3);

    let (status, _, _) = app.get("/api/movies?status=RELEASED").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_by_genre() {
    let app = TestApp::new();

    let (_, _, body) = app.get("/api/movies/genres?genre=Dra").await;
    assert_eq!(movie_codes(&body), vec!["20190001", "20230002"]);

    let (_, _, body) = app.get("/api/movies/genres?genre=Dra&exact=true").await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, _, body) = app.get("/api/movies/genres?genre=Sci-Fi&exact=true").await;
    assert_eq!(movie_codes(&body), vec!["20240003", "20250004"]);
}

#[tokio::test]
async fn test_duplicate_genres() {
    let app = TestApp::new();

    let (status, _, body) = app.get("/api/movies/genres/duplicates").await;
    assert_eq!(status, StatusCode::OK);

    let genres = body.as_array().unwrap();
    assert_eq!(genres.len(), 2);
    for genre in genres {
        assert_eq!(genre["count"], 2);
    }
    let names: Vec<&str> = genres
        .iter()
        .map(|g| g["genreNm"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Drama"));
    assert!(names.contains(&"Sci-Fi"));
}

#[tokio::test]
async fn test_ops_endpoints() {
    let app = TestApp::new();

    let (status, _, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);

    let (status, _, _) = app.get("/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
