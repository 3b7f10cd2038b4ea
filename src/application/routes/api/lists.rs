use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::application::auth::AuthenticatedUser;
use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::ids::{ListId, MovieId};
use crate::domain::lists::{MovieList, MovieListWithMovies, NewMovieList};

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn list_lists(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<Json<Vec<MovieList>>, ApiError> {
    let lists = state
        .list_repo
        .list_by_user(auth_user.user.id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(lists))
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewListSubmission {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn create_list(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(submission): Json<NewListSubmission>,
) -> Result<(StatusCode, Json<MovieList>), ApiError> {
    let new_list = NewMovieList {
        user_id: auth_user.user.id,
        name: submission.name,
        description: submission.description,
    }
    .normalize();
    if new_list.name.is_empty() {
        return Err(AppError::validation("list name must not be empty").into());
    }

    let list = state
        .list_repo
        .insert(new_list)
        .await
        .map_err(AppError::from)?;

    info!(list_id = %list.id, name = %list.name, "list created");
    Ok((StatusCode::CREATED, Json(list)))
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn get_list(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<ListId>,
) -> Result<Json<MovieListWithMovies>, ApiError> {
    let list = state
        .list_repo
        .get(auth_user.user.id, id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(list))
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn delete_list(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<ListId>,
) -> Result<StatusCode, ApiError> {
    state
        .list_repo
        .delete(auth_user.user.id, id)
        .await
        .map_err(AppError::from)?;

    info!(list_id = %id, "list deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListItemSubmission {
    movie_id: MovieId,
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn add_movie(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<ListId>,
    Json(submission): Json<ListItemSubmission>,
) -> Result<StatusCode, ApiError> {
    state
        .list_repo
        .add_movie(auth_user.user.id, id, submission.movie_id)
        .await
        .map_err(AppError::from)?;

    info!(list_id = %id, movie_id = %submission.movie_id, "movie added to list");
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn remove_movie(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, movie_id)): Path<(ListId, MovieId)>,
) -> Result<StatusCode, ApiError> {
    state
        .list_repo
        .remove_movie(auth_user.user.id, id, movie_id)
        .await
        .map_err(AppError::from)?;

    info!(list_id = %id, %movie_id, "movie removed from list");
    Ok(StatusCode::NO_CONTENT)
}
