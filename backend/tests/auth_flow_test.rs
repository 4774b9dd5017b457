//! End-to-end auth flow over the in-memory store

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_generated_customers_can_log_in() {
    let app = common::TestApp::in_memory();

    for _ in 0..3 {
        let (email, password) = app.register_customer().await;

        let login = json!({ "email": email, "password": password });
        let (status, body) = app.post("/api/auth/login", &login.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_str(&body).unwrap();
        let claims = app
            .state
            .customers()
            .jwt()
            .verify(body["token"].as_str().unwrap())
            .unwrap();
        assert_eq!(claims.sub, email);
    }
}

#[tokio::test]
async fn test_duplicate_then_mismatch() {
    let app = common::TestApp::in_memory();
    let (email, password) = app.register_customer().await;

    let again = common::registration_body(&email, &password, &password);
    let (status, body) = app.post("/api/auth/register", &again.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("DUPLICATE_EMAIL"));

    let mismatch = common::registration_body(&email, &password, "different");
    let (status, body) = app.post("/api/auth/register", &mismatch.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("PASSWORD_MISMATCH"));
}

#[tokio::test]
async fn test_concurrent_duplicate_registrations() {
    let app = common::TestApp::in_memory();
    let body = common::registration_body("race@example.com", "p1", "p1").to_string();

    let (first, second) = tokio::join!(
        app.post("/api/auth/register", &body),
        app.post("/api/auth/register", &body)
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::BAD_REQUEST]);
}

#[tokio::test]
async fn test_unrouted_paths_are_404() {
    let app = common::TestApp::in_memory();

    let (status, _) = app.get("/health").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/auth/login").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
