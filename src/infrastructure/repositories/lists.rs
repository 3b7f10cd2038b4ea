use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::ids::{ListId, MovieId, UserId};
use crate::domain::lists::{MovieList, MovieListWithMovies, NewMovieList};
use crate::domain::repositories::ListRepository;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::movies::movies::{MOVIE_COLUMNS, MovieRecord};
use crate::infrastructure::repositories::{conflict_or_db_err, db_err};

const LIST_COLUMNS: &str = "id, user_id, name, description, created_at";

#[derive(Clone)]
pub struct SqlListRepository {
    pool: DatabasePool,
}

impl SqlListRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch_owned(&self, user_id: UserId, id: ListId) -> Result<MovieList, RepositoryError> {
        query_as::<_, ListRecord>(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE id = ? AND user_id = ?"
        ))
        .bind(i64::from(id))
        .bind(i64::from(user_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .map(ListRecord::into_domain)
        .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl ListRepository for SqlListRepository {
    async fn insert(&self, list: NewMovieList) -> Result<MovieList, RepositoryError> {
        let list = list.normalize();
        let record = query_as::<_, ListRecord>(&format!(
            "INSERT INTO lists (user_id, name, description, created_at) VALUES (?, ?, ?, ?) \
             RETURNING {LIST_COLUMNS}"
        ))
        .bind(i64::from(list.user_id))
        .bind(&list.name)
        .bind(&list.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| conflict_or_db_err(err, "A list with this name already exists"))?;

        Ok(record.into_domain())
    }

    async fn get(
        &self,
        user_id: UserId,
        id: ListId,
    ) -> Result<MovieListWithMovies, RepositoryError> {
        let list = self.fetch_owned(user_id, id).await?;

        let movies: Vec<MovieRecord> = query_as(&format!(
            "SELECT {MOVIE_COLUMNS} FROM list_movies lm \
             JOIN movies m ON m.id = lm.movie_id \
             WHERE lm.list_id = ? ORDER BY lm.added_at, m.id"
        ))
        .bind(i64::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(MovieListWithMovies {
            list,
            movies: movies.into_iter().map(MovieRecord::into_domain).collect(),
        })
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<MovieList>, RepositoryError> {
        let records: Vec<ListRecord> = query_as(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE user_id = ? ORDER BY LOWER(name)"
        ))
        .bind(i64::from(user_id))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(records.into_iter().map(ListRecord::into_domain).collect())
    }

    async fn delete(&self, user_id: UserId, id: ListId) -> Result<(), RepositoryError> {
        let result = query("DELETE FROM lists WHERE id = ? AND user_id = ?")
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

    async fn add_movie(
        &self,
        user_id: UserId,
        id: ListId,
        movie_id: MovieId,
    ) -> Result<(), RepositoryError> {
        self.fetch_owned(user_id, id).await?;

        query("INSERT INTO list_movies (list_id, movie_id, added_at) VALUES (?, ?, ?)")
            .bind(i64::from(id))
            .bind(i64::from(movie_id))
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|err| {
                if let sqlx::Error::Database(database_err) = &err
                    && database_err.is_foreign_key_violation()
                {
                    return RepositoryError::NotFound;
                }
                conflict_or_db_err(err, "Movie is already on this list")
            })?;

        Ok(())
    }

    async fn remove_movie(
        &self,
        user_id: UserId,
        id: ListId,
        movie_id: MovieId,
    ) -> Result<(), RepositoryError> {
        self.fetch_owned(user_id, id).await?;

        let result = query("DELETE FROM list_movies WHERE list_id = ? AND movie_id = ?")
            .bind(i64::from(id))
            .bind(i64::from(movie_id))
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
struct ListRecord {
    id: i64,
    user_id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl ListRecord {
    fn into_domain(self) -> MovieList {
        MovieList {
            id: ListId::new(self.id),
            user_id: UserId::new(self.user_id),
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}
