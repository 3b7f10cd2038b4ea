use std::future::Future;
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::domain::RepositoryError;
use crate::domain::analytics::actors::merge_actor_rankings;
use crate::domain::analytics::averages::watch_averages;
use crate::domain::analytics::genres::{monthly_top_genres_with_others, top_genres_with_others};
use crate::domain::analytics::trends::period_trend;
use crate::domain::ids::UserId;
use crate::domain::movies::people::Gender;
use crate::domain::repositories::StatsRepository;
use crate::domain::stats::{PeriodGranularity, WatchedStatsReport};

pub const DEFAULT_TOP_N: u32 = 10;
pub const MAX_TOP_N: u32 = 50;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to query {metric}: {source}")]
    Query {
        metric: &'static str,
        #[source]
        source: RepositoryError,
    },
}

/// Await one storage query, tagging a failure with the metric it was for.
async fn metric<T>(
    metric: &'static str,
    query: impl Future<Output = Result<T, RepositoryError>>,
) -> Result<T, StatsError> {
    query
        .await
        .map_err(|source| StatsError::Query { metric, source })
}

/// Runs every stats query concurrently and assembles the report.
///
/// The first failing query aborts the rest; no partial report is returned.
#[tracing::instrument(skip(repo))]
pub async fn compute_watched_stats(
    repo: &dyn StatsRepository,
    user_id: UserId,
    top_n: u32,
) -> Result<WatchedStatsReport, StatsError> {
    let start = Instant::now();

    let (
        total_watched,
        total_hours,
        theater_vs_home,
        monthly_watched,
        yearly_watched,
        weekday_watched,
        monthly_hours,
        genre_counts,
        monthly_genre_counts,
        top_movies,
        most_watched_day,
        male_actors,
        female_actors,
        date_range,
    ) = tokio::try_join!(
        metric("total watched", repo.count_watched(user_id)),
        metric("total hours", repo.sum_hours_watched(user_id)),
        metric("theater vs home", repo.theater_vs_home(user_id)),
        metric(
            "monthly watched",
            repo.period_counts(user_id, PeriodGranularity::MonthLastYear)
        ),
        metric(
            "yearly watched",
            repo.period_counts(user_id, PeriodGranularity::Year)
        ),
        metric(
            "weekday watched",
            repo.period_counts(user_id, PeriodGranularity::Weekday)
        ),
        metric("monthly hours", repo.monthly_hours(user_id)),
        metric("genres", repo.genre_counts(user_id)),
        metric("monthly genres", repo.monthly_genre_breakdown(user_id)),
        metric("top movies", repo.top_movies(user_id, top_n)),
        metric("most watched day", repo.most_watched_day(user_id)),
        metric("male actors", repo.top_actors(user_id, Gender::Male, top_n)),
        metric(
            "female actors",
            repo.top_actors(user_id, Gender::Female, top_n)
        ),
        metric("date range", repo.watched_date_range(user_id)),
    )?;

    let limit = top_n as usize;
    let report = WatchedStatsReport {
        averages: watch_averages(total_watched as f64, date_range.as_ref()),
        hours_averages: watch_averages(total_hours, date_range.as_ref()),
        movies_trend: period_trend(&monthly_watched),
        hours_trend: period_trend(&monthly_hours),
        genres: top_genres_with_others(genre_counts, limit),
        monthly_genres: monthly_top_genres_with_others(monthly_genre_counts, limit),
        top_actors: merge_actor_rankings(male_actors, female_actors),
        total_watched,
        total_hours,
        theater_vs_home,
        monthly_watched,
        monthly_hours,
        yearly_watched,
        weekday_watched,
        top_movies,
        most_watched_day,
        date_range,
    };

    info!(duration_ms = start.elapsed().as_millis(), %user_id, "stats computed");
    Ok(report)
}
