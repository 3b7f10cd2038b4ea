pub mod api;

use axum::Json;
use axum::http::{HeaderValue, Request};
use axum::routing::get;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use crate::application::state::AppState;

/// 1 MB request body limit.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn app_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::router())
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(MovielogMakeSpan)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                )),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Clone)]
struct MovielogMakeSpan;

impl<B> MakeSpan<B> for MovielogMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
            user.id = tracing::field::Empty,
        )
    }
}
