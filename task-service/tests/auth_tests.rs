mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Smith",
            "username": "alice",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "alice");
    assert_eq!(body["first_name"], "Alice");
    assert_eq!(body["last_name"], "Smith");
    assert!(body["id"].is_i64());
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    let first = app.register("alice", "secret1").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.register("alice", "secret2").await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = second.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = 'alice'")
        .fetch_one(&app.db.pool)
        .await
        .expect("Failed to count users");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_usernames_are_case_sensitive() {
    let app = TestApp::spawn().await;

    assert_eq!(app.register("alice", "secret1").await.status(), StatusCode::CREATED);
    assert_eq!(app.register("Alice", "secret1").await.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "12345").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_missing_first_name() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_nul_in_username() {
    let app = TestApp::spawn().await;

    let response = app.register("ali\u{0}ce", "secret1").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    let response = app.login("alice", "secret1").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["token_type"], "bearer");
    assert!(body.get("data").is_none());

    let token = body["access_token"].as_str().unwrap();
    assert_eq!(app.authenticator.validate_token(token).unwrap(), "alice");
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    let wrong_password = app.login("alice", "wrong").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.headers().get("www-authenticate").unwrap(),
        "Bearer"
    );
    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();

    let unknown_user = app.login("bob", "secret1").await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();

    assert_eq!(wrong_password["message"], unknown_user["message"]);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/tasks")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_deleted_subject_is_rejected() {
    let app = TestApp::spawn().await;

    // Signed correctly but the subject was never registered
    let token = app.authenticator.issue_token("ghost").unwrap();

    let response = app
        .get_authenticated("/api/tasks", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn_with_token_lifetime(chrono::Duration::zero()).await;
    app.register("alice", "secret1").await;

    let body: serde_json::Value = app.login("alice", "secret1").await.json().await.unwrap();
    let token = body["access_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/tasks", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_root_and_health_are_public() {
    let app = TestApp::spawn().await;

    let root = app.get("/api").send().await.expect("Failed to execute request");
    assert_eq!(root.status(), StatusCode::OK);

    let health = app
        .get("/api/health")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(health.status(), StatusCode::OK);
}
