use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::helpers::spawn_app;

#[tokio::test]
async fn health_is_public() {
    let app = spawn_app().await;

    let response = Client::new()
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn api_requires_bearer_token() {
    let app = spawn_app().await;

    for path in ["/stats", "/watched", "/lists", "/movies/search?q=heat"] {
        let response = Client::new()
            .get(app.api_url(path))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{path} should require authentication"
        );
        let body: Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["message"], "Unauthorized");
    }
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let app = spawn_app().await;

    let response = Client::new()
        .get(app.api_url("/watched"))
        .bearer_auth("mvl_not-a-real-token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let app = spawn_app().await;

    let response = Client::new()
        .get(app.api_url("/watched"))
        .basic_auth("admin", Some(&app.auth_token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_is_accepted() {
    let app = spawn_app().await;

    let response = Client::new()
        .get(app.api_url("/watched"))
        .bearer_auth(&app.auth_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
}
