use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::ids::{MovieId, UserId, WatchedId};
use crate::domain::repositories::WatchedRepository;
use crate::domain::watched::{NewWatched, Watched, WatchedWithMovie};
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::db_err;

#[derive(Clone)]
pub struct SqlWatchedRepository {
    pool: DatabasePool,
}

impl SqlWatchedRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WatchedRepository for SqlWatchedRepository {
    async fn insert(&self, watched: NewWatched) -> Result<Watched, RepositoryError> {
        let record = query_as::<_, WatchedRecord>(
            "INSERT INTO watched (user_id, movie_id, watched_on, in_theater, created_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, user_id, movie_id, watched_on, in_theater, created_at",
        )
        .bind(i64::from(watched.user_id))
        .bind(i64::from(watched.movie_id))
        .bind(watched.watched_on)
        .bind(watched.in_theater)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(database_err) = &err
                && database_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            db_err(err)
        })?;

        Ok(record.into_domain())
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WatchedWithMovie>, RepositoryError> {
        let records: Vec<WatchedWithMovieRecord> = query_as(
            r"SELECT w.id, w.user_id, w.movie_id, w.watched_on, w.in_theater, w.created_at,
                     m.title AS movie_title, m.poster_path
              FROM watched w
              JOIN movies m ON m.id = w.movie_id
              WHERE w.user_id = ?
              ORDER BY w.watched_on DESC, w.id DESC",
        )
        .bind(i64::from(user_id))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(records
            .into_iter()
            .map(|r| WatchedWithMovie {
                watched: Watched {
                    id: WatchedId::new(r.id),
                    user_id: UserId::new(r.user_id),
                    movie_id: MovieId::new(r.movie_id),
                    watched_on: r.watched_on,
                    in_theater: r.in_theater,
                    created_at: r.created_at,
                },
                movie_title: r.movie_title,
                poster_path: r.poster_path,
            })
            .collect())
    }

    async fn delete(&self, user_id: UserId, id: WatchedId) -> Result<(), RepositoryError> {
        let result = query("DELETE FROM watched WHERE id = ? AND user_id = ?")
            .bind(i64::from(id))
            .bind(i64::from(user_id))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WatchedRecord {
    id: i64,
    user_id: i64,
    movie_id: i64,
    watched_on: NaiveDate,
    in_theater: bool,
    created_at: DateTime<Utc>,
}

impl WatchedRecord {
    fn into_domain(self) -> Watched {
        Watched {
            id: WatchedId::new(self.id),
            user_id: UserId::new(self.user_id),
            movie_id: MovieId::new(self.movie_id),
            watched_on: self.watched_on,
            in_theater: self.in_theater,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WatchedWithMovieRecord {
    id: i64,
    user_id: i64,
    movie_id: i64,
    watched_on: NaiveDate,
    in_theater: bool,
    created_at: DateTime<Utc>,
    movie_title: String,
    poster_path: Option<String>,
}
