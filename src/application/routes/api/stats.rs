use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::application::auth::AuthenticatedUser;
use crate::application::errors::{ApiError, AppError};
use crate::application::services::stats::{DEFAULT_TOP_N, MAX_TOP_N, compute_watched_stats};
use crate::application::state::AppState;
use crate::domain::stats::WatchedStatsReport;

#[derive(Debug, Deserialize)]
pub(crate) struct StatsQuery {
    top: Option<u32>,
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn get_stats(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<StatsQuery>,
) -> Result<Json<WatchedStatsReport>, ApiError> {
    let top_n = query.top.unwrap_or(DEFAULT_TOP_N);
    if !(1..=MAX_TOP_N).contains(&top_n) {
        return Err(AppError::validation(format!("top must be between 1 and {MAX_TOP_N}")).into());
    }

    let report = compute_watched_stats(&*state.stats_repo, auth_user.user.id, top_n)
        .await
        .map_err(AppError::from)?;
    Ok(Json(report))
}
