use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{get_json, import_movie, mount_tmdb_movie, post_json, spawn_app};

#[tokio::test]
async fn list_lifecycle() {
    let app = spawn_app().await;
    mount_tmdb_movie(&app, 949, "Heat", 170, &[(80, "Crime")], &[]).await;
    let movie_id = import_movie(&app, 949).await;

    let list: Value = post_json(
        &app,
        "/lists",
        &json!({ "name": "  Heist movies ", "description": "Crews and capers" }),
    )
    .await;
    assert_eq!(list["name"], "Heist movies");
    let list_id = list["id"].as_i64().expect("list id");

    let response = app
        .client()
        .post(app.api_url(&format!("/lists/{list_id}/movies")))
        .bearer_auth(&app.auth_token)
        .json(&json!({ "movie_id": movie_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let detail: Value = get_json(&app, &format!("/lists/{list_id}")).await;
    assert_eq!(detail["movies"][0]["title"], "Heat");

    let lists: Vec<Value> = get_json(&app, "/lists").await;
    assert_eq!(lists.len(), 1);

    let response = app
        .client()
        .delete(app.api_url(&format!("/lists/{list_id}/movies/{movie_id}")))
        .bearer_auth(&app.auth_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .client()
        .delete(app.api_url(&format!("/lists/{list_id}")))
        .bearer_auth(&app.auth_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .client()
        .get(app.api_url(&format!("/lists/{list_id}")))
        .bearer_auth(&app.auth_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adding_same_movie_twice_conflicts() {
    let app = spawn_app().await;
    mount_tmdb_movie(&app, 949, "Heat", 170, &[], &[]).await;
    let movie_id = import_movie(&app, 949).await;
    let list: Value = post_json(&app, "/lists", &json!({ "name": "Favourites" })).await;
    let list_id = list["id"].as_i64().expect("list id");

    let mut statuses = Vec::new();
    for _ in 0..2 {
        let response = app
            .client()
            .post(app.api_url(&format!("/lists/{list_id}/movies")))
            .bearer_auth(&app.auth_token)
            .json(&json!({ "movie_id": movie_id }))
            .send()
            .await
            .expect("Failed to execute request");
        statuses.push(response.status());
    }

    assert_eq!(statuses, vec![StatusCode::NO_CONTENT, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn duplicate_list_name_conflicts() {
    let app = spawn_app().await;
    let _: Value = post_json(&app, "/lists", &json!({ "name": "Favourites" })).await;

    let response = app
        .client()
        .post(app.api_url("/lists"))
        .bearer_auth(&app.auth_token)
        .json(&json!({ "name": "Favourites" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "A list with this name already exists");
}

#[tokio::test]
async fn blank_list_name_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .client()
        .post(app.api_url("/lists"))
        .bearer_auth(&app.auth_token)
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lists_are_private_to_their_owner() {
    let app = spawn_app().await;
    let list: Value = post_json(&app, "/lists", &json!({ "name": "Mine" })).await;
    let list_id = list["id"].as_i64().expect("list id");
    let other_token = app.create_user("other").await;

    let response = app
        .client()
        .get(app.api_url(&format!("/lists/{list_id}")))
        .bearer_auth(&other_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let lists: Vec<Value> = app
        .client()
        .get(app.api_url("/lists"))
        .bearer_auth(&other_token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert!(lists.is_empty());
}
