use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::application::auth::AuthenticatedUser;
use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::ids::MovieId;
use crate::domain::metadata::MovieSearchResult;
use crate::domain::movies::movies::MovieWithDetails;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[tracing::instrument(skip(state, _auth_user))]
pub(crate) async fn search_movies(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<MovieSearchResult>>, ApiError> {
    let results = state.movie_service.search(&query.q).await?;
    Ok(Json(results))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportMovieRequest {
    tmdb_id: i64,
}

#[tracing::instrument(skip(state, _auth_user))]
pub(crate) async fn import_movie(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Json(request): Json<ImportMovieRequest>,
) -> Result<(StatusCode, Json<MovieWithDetails>), ApiError> {
    let movie = state.movie_service.import(request.tmdb_id).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

#[tracing::instrument(skip(state, _auth_user))]
pub(crate) async fn get_movie(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<MovieId>,
) -> Result<Json<MovieWithDetails>, ApiError> {
    let movie = state
        .movie_repo
        .get_with_details(id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(movie))
}
