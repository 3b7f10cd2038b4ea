use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::Value;

use crate::helpers::{get_json, import_movie, mount_tmdb_movie, record_watched, spawn_app};

fn sum_counts(series: &Value, field: &str) -> i64 {
    series
        .as_array()
        .map(|items| items.iter().filter_map(|i| i[field].as_i64()).sum())
        .unwrap_or_default()
}

#[tokio::test]
async fn stats_require_authentication() {
    let app = spawn_app().await;

    let response = app
        .client()
        .get(app.api_url("/stats"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_history_yields_zeroed_report() {
    let app = spawn_app().await;

    let report: Value = get_json(&app, "/stats").await;

    assert_eq!(report["total_watched"], 0);
    assert_eq!(report["total_hours"], 0.0);
    assert!(report["most_watched_day"].is_null());
    assert!(report["date_range"].is_null());
    assert_eq!(report["averages"]["per_day"], 0.0);
    assert_eq!(report["movies_trend"]["direction"], "neutral");
    assert_eq!(report["movies_trend"]["value"], 0);
    assert_eq!(report["genres"].as_array().map(Vec::len), Some(0));
    assert_eq!(report["top_actors"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn report_aggregates_watched_history() {
    let app = spawn_app().await;
    mount_tmdb_movie(
        &app,
        949,
        "Heat",
        170,
        &[(80, "Crime"), (18, "Drama"), (28, "Action")],
        &[
            (1158, "Al Pacino", 2),
            (380, "Robert De Niro", 2),
            (6365, "Ashley Judd", 1),
        ],
    )
    .await;
    mount_tmdb_movie(
        &app,
        603,
        "The Matrix",
        136,
        &[(28, "Action"), (878, "Science Fiction")],
        &[(6384, "Keanu Reeves", 2), (530, "Carrie-Anne Moss", 1)],
    )
    .await;
    let heat = import_movie(&app, 949).await;
    let matrix = import_movie(&app, 603).await;

    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);
    record_watched(&app, heat, &yesterday.to_string(), false).await;
    record_watched(&app, heat, &today.to_string(), true).await;
    record_watched(&app, matrix, &today.to_string(), false).await;

    let report: Value = get_json(&app, "/stats?top=2").await;

    assert_eq!(report["total_watched"], 3);
    let hours = report["total_hours"].as_f64().expect("hours");
    assert!((hours - 476.0 / 60.0).abs() < 1e-9);

    assert_eq!(report["theater_vs_home"][0]["label"], "Theater");
    assert_eq!(report["theater_vs_home"][0]["count"], 1);
    assert_eq!(report["theater_vs_home"][1]["label"], "Home");
    assert_eq!(report["theater_vs_home"][1]["count"], 2);

    assert_eq!(sum_counts(&report["monthly_watched"], "value"), 3);
    assert_eq!(sum_counts(&report["yearly_watched"], "value"), 3);
    assert_eq!(sum_counts(&report["weekday_watched"], "value"), 3);
    assert_eq!(report["movies_trend"]["direction"], "up");

    let genres: Vec<(String, i64)> = report["genres"]
        .as_array()
        .expect("genres")
        .iter()
        .map(|g| {
            (
                g["name"].as_str().unwrap_or_default().to_string(),
                g["count"].as_i64().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        genres,
        vec![
            ("Action".to_string(), 3),
            ("Crime".to_string(), 2),
            ("Others".to_string(), 3),
        ]
    );

    assert_eq!(report["top_movies"][0]["title"], "Heat");
    assert_eq!(report["top_movies"][0]["count"], 2);
    assert_eq!(report["top_movies"].as_array().map(Vec::len), Some(2));

    assert_eq!(report["most_watched_day"]["date"], today.to_string());
    assert_eq!(report["most_watched_day"]["count"], 2);

    assert_eq!(report["date_range"]["min_date"], yesterday.to_string());
    assert_eq!(report["date_range"]["max_date"], today.to_string());
    assert_eq!(report["averages"]["per_day"], 1.5);

    let actors: Vec<&str> = report["top_actors"]
        .as_array()
        .expect("actors")
        .iter()
        .filter_map(|a| a["name"].as_str())
        .collect();
    assert_eq!(
        actors,
        vec!["Al Pacino", "Keanu Reeves", "Ashley Judd", "Carrie-Anne Moss"]
    );
}

#[tokio::test]
async fn stats_are_scoped_to_the_caller() {
    let app = spawn_app().await;
    mount_tmdb_movie(&app, 603, "The Matrix", 136, &[(28, "Action")], &[]).await;
    let matrix = import_movie(&app, 603).await;
    record_watched(&app, matrix, "2023-01-01", false).await;

    let other_token = app.create_user("other").await;
    let report: Value = app
        .client()
        .get(app.api_url("/stats"))
        .bearer_auth(&other_token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(report["total_watched"], 0);
}

#[tokio::test]
async fn top_parameter_is_validated() {
    let app = spawn_app().await;

    for top in ["0", "51"] {
        let response = app
            .client()
            .get(app.api_url(&format!("/stats?top={top}")))
            .bearer_auth(&app.auth_token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "top={top}");
    }
}
