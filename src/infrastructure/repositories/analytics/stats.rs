use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{query_as, query_scalar};

use crate::domain::RepositoryError;
use crate::domain::ids::{MovieId, PersonId, UserId};
use crate::domain::movies::people::Gender;
use crate::domain::repositories::StatsRepository;
use crate::domain::stats::{
    DateRange, GenreCount, LabelCount, MonthlyGenreBreakdown, PeriodCount, PeriodGranularity,
    PeriodHours, TopActor, TopDay, TopMovie,
};
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::db_err;

/// Lower bound for the twelve-month window: the first day of the month
/// eleven months before the current one.
const LAST_YEAR_START: &str = "date('now', 'start of month', '-11 months')";

// --- Internal record types ---

#[derive(sqlx::FromRow)]
struct NameCount {
    name: String,
    count: i64,
}

#[derive(sqlx::FromRow)]
struct NameHours {
    name: String,
    hours: f64,
}

#[derive(sqlx::FromRow)]
struct MonthGenreCount {
    month: String,
    name: String,
    count: i64,
}

#[derive(sqlx::FromRow)]
struct TopMovieRecord {
    movie_id: i64,
    title: String,
    poster_path: Option<String>,
    count: i64,
}

#[derive(sqlx::FromRow)]
struct TopDayRecord {
    date: NaiveDate,
    count: i64,
}

#[derive(sqlx::FromRow)]
struct TopActorRecord {
    person_id: i64,
    name: String,
    profile_path: Option<String>,
    count: i64,
}

#[derive(sqlx::FromRow)]
struct DateRangeRecord {
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
}

// --- Helpers ---

fn period_counts(records: Vec<NameCount>) -> Vec<PeriodCount> {
    records
        .into_iter()
        .map(|r| PeriodCount::new(r.name, r.count))
        .collect()
}

/// Fold `(month, genre, count)` rows, ordered by month, into one breakdown
/// per month.
fn group_monthly_genres(records: Vec<MonthGenreCount>) -> Vec<MonthlyGenreBreakdown> {
    let mut months: Vec<MonthlyGenreBreakdown> = Vec::new();
    for record in records {
        match months.last_mut() {
            Some(current) if current.month == record.month => {
                *current.genres.entry(record.name).or_insert(0) += record.count as u64;
            }
            _ => months.push(MonthlyGenreBreakdown {
                month: record.month,
                genres: BTreeMap::from([(record.name, record.count as u64)]),
            }),
        }
    }
    months
}

// --- Repository ---

#[derive(Clone)]
pub struct SqlStatsRepository {
    pool: DatabasePool,
}

impl SqlStatsRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch_monthly_counts(&self, uid: i64) -> Result<Vec<NameCount>, RepositoryError> {
        query_as(&format!(
            "SELECT strftime('%Y-%m', watched_on) AS name, COUNT(*) AS count \
             FROM watched \
             WHERE user_id = ? AND watched_on >= {LAST_YEAR_START} \
             GROUP BY name ORDER BY name"
        ))
        .bind(uid)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn fetch_yearly_counts(&self, uid: i64) -> Result<Vec<NameCount>, RepositoryError> {
        query_as(
            r"SELECT strftime('%Y', watched_on) AS name, COUNT(*) AS count
              FROM watched
              WHERE user_id = ?
              GROUP BY name ORDER BY name",
        )
        .bind(uid)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn fetch_weekday_counts(&self, uid: i64) -> Result<Vec<NameCount>, RepositoryError> {
        query_as(
            r"SELECT
                CASE CAST(strftime('%w', watched_on) AS INTEGER)
                  WHEN 0 THEN 'Sunday' WHEN 1 THEN 'Monday' WHEN 2 THEN 'Tuesday'
                  WHEN 3 THEN 'Wednesday' WHEN 4 THEN 'Thursday' WHEN 5 THEN 'Friday'
                  ELSE 'Saturday'
                END AS name,
                COUNT(*) AS count
              FROM watched
              WHERE user_id = ?
              GROUP BY strftime('%w', watched_on)
              ORDER BY CAST(strftime('%w', watched_on) AS INTEGER)",
        )
        .bind(uid)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }
}

#[async_trait]
impl StatsRepository for SqlStatsRepository {
    async fn count_watched(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let count: i64 = query_scalar("SELECT COUNT(*) FROM watched WHERE user_id = ?")
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(count as u64)
    }

    async fn sum_hours_watched(&self, user_id: UserId) -> Result<f64, RepositoryError> {
        query_scalar(
            r"SELECT COALESCE(SUM(m.runtime), 0) / 60.0
              FROM watched w
              JOIN movies m ON m.id = w.movie_id
              WHERE w.user_id = ?",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn theater_vs_home(&self, user_id: UserId) -> Result<Vec<LabelCount>, RepositoryError> {
        let records: Vec<NameCount> = query_as(
            r"SELECT CASE in_theater WHEN 1 THEN 'Theater' ELSE 'Home' END AS name,
                     COUNT(*) AS count
              FROM watched
              WHERE user_id = ?
              GROUP BY in_theater
              ORDER BY in_theater DESC",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(records
            .into_iter()
            .map(|r| LabelCount {
                label: r.name,
                count: r.count as u64,
            })
            .collect())
    }

    async fn period_counts(
        &self,
        user_id: UserId,
        granularity: PeriodGranularity,
    ) -> Result<Vec<PeriodCount>, RepositoryError> {
        let uid = user_id.into_inner();
        let records = match granularity {
            PeriodGranularity::MonthLastYear => self.fetch_monthly_counts(uid).await?,
            PeriodGranularity::Year => self.fetch_yearly_counts(uid).await?,
            PeriodGranularity::Weekday => self.fetch_weekday_counts(uid).await?,
        };
        Ok(period_counts(records))
    }

    async fn monthly_hours(&self, user_id: UserId) -> Result<Vec<PeriodHours>, RepositoryError> {
        let records: Vec<NameHours> = query_as(&format!(
            "SELECT strftime('%Y-%m', w.watched_on) AS name, \
                    COALESCE(SUM(m.runtime), 0) / 60.0 AS hours \
             FROM watched w \
             JOIN movies m ON m.id = w.movie_id \
             WHERE w.user_id = ? AND w.watched_on >= {LAST_YEAR_START} \
             GROUP BY name ORDER BY name"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(records
            .into_iter()
            .map(|r| PeriodHours::new(r.name, r.hours))
            .collect())
    }

    async fn genre_counts(&self, user_id: UserId) -> Result<Vec<GenreCount>, RepositoryError> {
        let records: Vec<NameCount> = query_as(
            r"SELECT g.name AS name, COUNT(*) AS count
              FROM watched w
              JOIN movie_genres mg ON mg.movie_id = w.movie_id
              JOIN genres g ON g.id = mg.genre_id
              WHERE w.user_id = ?
              GROUP BY g.id
              ORDER BY count DESC, g.name ASC",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(records
            .into_iter()
            .map(|r| GenreCount::new(r.name, r.count as u64))
            .collect())
    }

    async fn monthly_genre_breakdown(
        &self,
        user_id: UserId,
    ) -> Result<Vec<MonthlyGenreBreakdown>, RepositoryError> {
        let records: Vec<MonthGenreCount> = query_as(&format!(
            "SELECT strftime('%Y-%m', w.watched_on) AS month, g.name AS name, COUNT(*) AS count \
             FROM watched w \
             JOIN movie_genres mg ON mg.movie_id = w.movie_id \
             JOIN genres g ON g.id = mg.genre_id \
             WHERE w.user_id = ? AND w.watched_on >= {LAST_YEAR_START} \
             GROUP BY month, g.id \
             ORDER BY month, g.name"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(group_monthly_genres(records))
    }

    async fn top_movies(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<TopMovie>, RepositoryError> {
        let records: Vec<TopMovieRecord> = query_as(
            r"SELECT m.id AS movie_id, m.title AS title, m.poster_path AS poster_path,
                     COUNT(*) AS count
              FROM watched w
              JOIN movies m ON m.id = w.movie_id
              WHERE w.user_id = ?
              GROUP BY m.id
              ORDER BY count DESC, MAX(w.watched_on) DESC, m.title ASC
              LIMIT ?",
        )
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(records
            .into_iter()
            .map(|r| TopMovie {
                movie_id: MovieId::new(r.movie_id),
                title: r.title,
                poster_path: r.poster_path,
                count: r.count as u64,
            })
            .collect())
    }

    async fn most_watched_day(&self, user_id: UserId) -> Result<Option<TopDay>, RepositoryError> {
        let record: Option<TopDayRecord> = query_as(
            r"SELECT watched_on AS date, COUNT(*) AS count
              FROM watched
              WHERE user_id = ?
              GROUP BY watched_on
              ORDER BY count DESC, watched_on DESC
              LIMIT 1",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(record.map(|r| TopDay {
            date: r.date,
            count: r.count as u64,
        }))
    }

    async fn top_actors(
        &self,
        user_id: UserId,
        gender: Gender,
        limit: u32,
    ) -> Result<Vec<TopActor>, RepositoryError> {
        let records: Vec<TopActorRecord> = query_as(
            r"SELECT p.id AS person_id, p.name AS name, p.profile_path AS profile_path,
                     COUNT(DISTINCT w.movie_id) AS count
              FROM watched w
              JOIN movie_cast mc ON mc.movie_id = w.movie_id
              JOIN people p ON p.id = mc.person_id
              WHERE w.user_id = ? AND p.gender = ?
              GROUP BY p.id
              ORDER BY count DESC, p.name ASC
              LIMIT ?",
        )
        .bind(user_id.into_inner())
        .bind(gender.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(records
            .into_iter()
            .map(|r| TopActor {
                person_id: PersonId::new(r.person_id),
                name: r.name,
                profile_path: r.profile_path,
                gender,
                count: r.count as u64,
            })
            .collect())
    }

    async fn watched_date_range(
        &self,
        user_id: UserId,
    ) -> Result<Option<DateRange>, RepositoryError> {
        let record: DateRangeRecord = query_as(
            r"SELECT MIN(watched_on) AS min_date, MAX(watched_on) AS max_date
              FROM watched
              WHERE user_id = ?",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(match record {
            DateRangeRecord {
                min_date: None,
                max_date: None,
            } => None,
            DateRangeRecord { min_date, max_date } => Some(DateRange { min_date, max_date }),
        })
    }
}
