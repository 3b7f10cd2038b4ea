use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{get_json, import_movie, mount_tmdb_movie, record_watched, spawn_app};

#[tokio::test]
async fn watched_events_are_listed_newest_first() {
    let app = spawn_app().await;
    mount_tmdb_movie(&app, 603, "The Matrix", 136, &[(28, "Action")], &[]).await;
    let movie_id = import_movie(&app, 603).await;

    record_watched(&app, movie_id, "2023-01-01", false).await;
    record_watched(&app, movie_id, "2023-06-15", true).await;

    let watched: Vec<Value> = get_json(&app, "/watched").await;

    assert_eq!(watched.len(), 2);
    assert_eq!(watched[0]["watched_on"], "2023-06-15");
    assert_eq!(watched[0]["in_theater"], true);
    assert_eq!(watched[0]["movie_title"], "The Matrix");
    assert_eq!(watched[1]["watched_on"], "2023-01-01");
}

#[tokio::test]
async fn future_watch_date_is_rejected() {
    let app = spawn_app().await;
    mount_tmdb_movie(&app, 603, "The Matrix", 136, &[], &[]).await;
    let movie_id = import_movie(&app, 603).await;
    let tomorrow = (Utc::now().date_naive() + Duration::days(2)).to_string();

    let response = app
        .client()
        .post(app.api_url("/watched"))
        .bearer_auth(&app.auth_token)
        .json(&json!({ "movie_id": movie_id, "watched_on": tomorrow }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn watching_unknown_movie_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .client()
        .post(app.api_url("/watched"))
        .bearer_auth(&app.auth_token)
        .json(&json!({ "movie_id": 12345, "watched_on": "2023-01-01" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_only_own_events() {
    let app = spawn_app().await;
    mount_tmdb_movie(&app, 603, "The Matrix", 136, &[], &[]).await;
    let movie_id = import_movie(&app, 603).await;
    record_watched(&app, movie_id, "2023-01-01", false).await;

    let watched: Vec<Value> = get_json(&app, "/watched").await;
    let watched_id = watched[0]["id"].as_i64().expect("watched id");

    let other_token = app.create_user("other").await;
    let response = app
        .client()
        .delete(app.api_url(&format!("/watched/{watched_id}")))
        .bearer_auth(&other_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .client()
        .delete(app.api_url(&format!("/watched/{watched_id}")))
        .bearer_auth(&app.auth_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let watched: Vec<Value> = get_json(&app, "/watched").await;
    assert!(watched.is_empty());
}
