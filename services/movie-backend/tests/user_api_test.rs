//! 注册、重复检查、昵称推荐接口测试

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

fn join_body(login_id: &str, email: &str, nickname: &str) -> serde_json::Value {
    json!({
        "loginId": login_id,
        "password": "Secret#2024",
        "passwordConfirm": "Secret#2024",
        "email": email,
        "nickname": nickname,
    })
}

#[tokio::test]
async fn test_join_success() {
    let app = TestApp::new();

    let (status, _, body) = app
        .post_json(
            "/api/users/join",
            join_body("moviefan", "Fan@Example.com", "Popcorn"),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["loginId"], "moviefan");
    assert_eq!(body["email"], "fan@example.com");
    assert_eq!(body["nickname"], "Popcorn");
    assert_eq!(body["redirect"], "/login");

    let stored = app.users.by_email("fan@example.com").unwrap();
    assert!(stored.verify_password("Secret#2024"));
    assert!(stored.social_join_completed);
}

#[tokio::test]
async fn test_join_rejects_duplicates() {
    let app = TestApp::new();
    app.seed_local_user("moviefan", "fan@example.com", "Popcorn", "Secret#2024")
        .await;

    let (status, _, body) = app
        .post_json(
            "/api/users/join",
            join_body("moviefan", "other@example.com", "Nachos"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "This login ID is already in use.");

    let (status, _, body) = app
        .post_json(
            "/api/users/join",
            join_body("another", "FAN@example.com", "Nachos"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This email is already registered.");

    let (status, _, body) = app
        .post_json(
            "/api/users/join",
            join_body("another", "other@example.com", "Popcorn"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This nickname is already in use.");

    assert_eq!(app.users.all().len(), 1);
}

#[tokio::test]
async fn test_join_rejects_social_login_id_prefix() {
    let app = TestApp::new();

    for login_id in ["google_100", "Kakao_fan", "naver_1234"] {
        let (status, _, body) = app
            .post_json(
                "/api/users/join",
                join_body(login_id, "fan@example.com", "Popcorn"),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Login ID may not start with a social provider prefix."
        );
    }

    assert!(app.users.all().is_empty());
}

#[tokio::test]
async fn test_join_validation_failures() {
    let app = TestApp::new();

    let mut mismatch = join_body("moviefan", "fan@example.com", "Popcorn");
    mismatch["passwordConfirm"] = json!("Different#2024");
    let (status, _, body) = app.post_json("/api/users/join", mismatch).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut weak = join_body("moviefan", "fan@example.com", "Popcorn");
    weak["password"] = json!("password");
    weak["passwordConfirm"] = json!("password");
    let (status, _, _) = app.post_json("/api/users/join", weak).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .post_json(
            "/api/users/join",
            join_body("moviefan", "not-an-email", "Popcorn"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app
        .post_json(
            "/api/users/join",
            join_body("a b", "fan@example.com", "Popcorn"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.users.all().is_empty());
}

#[tokio::test]
async fn test_duplicate_checks() {
    let app = TestApp::new();
    app.seed_local_user("moviefan", "fan@example.com", "Popcorn", "Secret#2024")
        .await;

    let (status, _, body) = app.get("/api/users/check-login-id?loginId=moviefan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duplicate"], true);
    assert_eq!(body["available"], false);

    let (_, _, body) = app.get("/api/users/check-login-id?loginId=newcomer").await;
    assert_eq!(body["duplicate"], false);
    assert_eq!(body["available"], true);

    let (_, _, body) = app
        .get("/api/users/check-email?email=FAN%40example.com")
        .await;
    assert_eq!(body["duplicate"], true);

    let (_, _, body) = app.get("/api/users/check-nickname?nickname=Popcorn").await;
    assert_eq!(body["duplicate"], true);

    let (_, _, body) = app.get("/api/users/check-nickname?nickname=Nachos").await;
    assert_eq!(body["available"], true);
}

#[tokio::test]
async fn test_duplicate_check_requires_param() {
    let app = TestApp::new();
    let (status, _, _) = app.get("/api/users/check-login-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_nickname() {
    let app = TestApp::new();

    let (status, _, body) = app.get("/api/users/recommend-nickname").await;
    assert_eq!(status, StatusCode::OK);

    let nicknames = body["nicknames"].as_array().unwrap();
    assert_eq!(nicknames.len(), 5);
    for nickname in nicknames {
        let nickname = nickname.as_str().unwrap();
        assert!(!nickname.is_empty());
        assert!(nickname.chars().count() <= 20);
    }
}
