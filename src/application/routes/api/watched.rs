use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use crate::application::auth::AuthenticatedUser;
use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::ids::{MovieId, WatchedId};
use crate::domain::watched::{NewWatched, Watched, WatchedWithMovie};

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn list_watched(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<Json<Vec<WatchedWithMovie>>, ApiError> {
    let watched = state
        .watched_repo
        .list_by_user(auth_user.user.id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(watched))
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewWatchedSubmission {
    movie_id: MovieId,
    watched_on: NaiveDate,
    #[serde(default)]
    in_theater: bool,
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn create_watched(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(submission): Json<NewWatchedSubmission>,
) -> Result<(StatusCode, Json<Watched>), ApiError> {
    let new_watched = NewWatched {
        user_id: auth_user.user.id,
        movie_id: submission.movie_id,
        watched_on: submission.watched_on,
        in_theater: submission.in_theater,
    };
    new_watched
        .validate(Utc::now().date_naive())
        .map_err(AppError::validation)?;

    let watched = state
        .watched_repo
        .insert(new_watched)
        .await
        .map_err(AppError::from)?;

    info!(
        watched_id = %watched.id,
        movie_id = %watched.movie_id,
        user_id = %watched.user_id,
        "watched event recorded"
    );
    Ok((StatusCode::CREATED, Json(watched)))
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn delete_watched(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<WatchedId>,
) -> Result<StatusCode, ApiError> {
    state
        .watched_repo
        .delete(auth_user.user.id, id)
        .await
        .map_err(AppError::from)?;

    info!(watched_id = %id, "watched event deleted");
    Ok(StatusCode::NO_CONTENT)
}
