use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{get_json, import_movie, mount_tmdb_movie, spawn_app};

#[tokio::test]
async fn search_proxies_to_tmdb() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "Heat"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                { "id": 949, "title": "Heat", "release_date": "1995-12-15",
                  "overview": "Obsessive master thief.", "poster_path": "/heat.jpg" }
            ]
        })))
        .mount(&app.tmdb)
        .await;

    let results: Vec<Value> = get_json(&app, "/movies/search?q=Heat").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["tmdb_id"], 949);
    assert_eq!(results[0]["release_date"], "1995-12-15");
}

#[tokio::test]
async fn blank_search_is_a_validation_error() {
    let app = spawn_app().await;

    let response = app
        .client()
        .get(app.api_url("/movies/search?q=%20"))
        .bearer_auth(&app.auth_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn import_caches_movie_with_genres_and_cast() {
    let app = spawn_app().await;
    mount_tmdb_movie(
        &app,
        949,
        "Heat",
        170,
        &[(80, "Crime"), (18, "Drama")],
        &[(1158, "Al Pacino", 2), (380, "Robert De Niro", 2)],
    )
    .await;

    let response = app
        .client()
        .post(app.api_url("/movies"))
        .bearer_auth(&app.auth_token)
        .json(&json!({ "tmdb_id": 949 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let movie: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(movie["title"], "Heat");
    assert_eq!(movie["runtime"], 170);
    assert!(movie["original_title"].is_null());
    assert_eq!(movie["genres"].as_array().map(Vec::len), Some(2));
    assert_eq!(movie["cast"][0]["person"]["name"], "Al Pacino");
    assert_eq!(movie["cast"][0]["person"]["gender"], "male");

    let id = movie["id"].as_i64().expect("movie id");
    let fetched: Value = get_json(&app, &format!("/movies/{id}")).await;
    assert_eq!(fetched["tmdb_id"], 949);
}

#[tokio::test]
async fn repeated_import_returns_cached_movie() {
    let app = spawn_app().await;
    mount_tmdb_movie(&app, 603, "The Matrix", 136, &[(28, "Action")], &[]).await;

    let first = import_movie(&app, 603).await;
    let second = import_movie(&app, 603).await;

    assert_eq!(first, second);
    let detail_requests = app
        .tmdb
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == "/movie/603")
        .count();
    assert_eq!(detail_requests, 1);
}

#[tokio::test]
async fn import_of_unknown_tmdb_movie_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .client()
        .post(app.api_url("/movies"))
        .bearer_auth(&app.auth_token)
        .json(&json!({ "tmdb_id": 4242 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn provider_failure_is_bad_gateway() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/movie/13"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.tmdb)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/13/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 13, "cast": [] })))
        .mount(&app.tmdb)
        .await;

    let response = app
        .client()
        .post(app.api_url("/movies"))
        .bearer_auth(&app.auth_token)
        .json(&json!({ "tmdb_id": 13 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn unknown_local_movie_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .client()
        .get(app.api_url("/movies/999"))
        .bearer_auth(&app.auth_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
