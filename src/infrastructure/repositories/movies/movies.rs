use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{query, query_as, query_scalar};

use crate::domain::RepositoryError;
use crate::domain::ids::{GenreId, MovieId, PersonId};
use crate::domain::movies::genres::Genre;
use crate::domain::movies::movies::{Movie, MovieWithDetails, NewMovie};
use crate::domain::movies::people::{CastMember, Gender, Person};
use crate::domain::repositories::MovieRepository;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::db_err;

pub(crate) const MOVIE_COLUMNS: &str = "m.id, m.tmdb_id, m.title, m.original_title, m.overview, \
     m.release_date, m.runtime, m.poster_path, m.created_at";

#[derive(Clone)]
pub struct SqlMovieRepository {
    pool: DatabasePool,
}

impl SqlMovieRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch_genres(&self, id: MovieId) -> Result<Vec<Genre>, RepositoryError> {
        let records: Vec<GenreRecord> = query_as(
            r"SELECT g.id, g.tmdb_id, g.name
              FROM movie_genres mg
              JOIN genres g ON g.id = mg.genre_id
              WHERE mg.movie_id = ?
              ORDER BY g.name",
        )
        .bind(i64::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(records
            .into_iter()
            .map(|r| Genre {
                id: GenreId::new(r.id),
                tmdb_id: r.tmdb_id,
                name: r.name,
            })
            .collect())
    }

    async fn fetch_cast(&self, id: MovieId) -> Result<Vec<CastMember>, RepositoryError> {
        let records: Vec<CastRecord> = query_as(
            r"SELECT p.id, p.tmdb_id, p.name, p.gender, p.profile_path,
                     mc.character, mc.billing_order
              FROM movie_cast mc
              JOIN people p ON p.id = mc.person_id
              WHERE mc.movie_id = ?
              ORDER BY mc.billing_order",
        )
        .bind(i64::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        records
            .into_iter()
            .map(|r| {
                let gender = Gender::from_str(&r.gender).map_err(|()| {
                    RepositoryError::unexpected(format!("invalid gender: {}", r.gender))
                })?;
                Ok(CastMember {
                    person: Person {
                        id: PersonId::new(r.id),
                        tmdb_id: r.tmdb_id,
                        name: r.name,
                        gender,
                        profile_path: r.profile_path,
                    },
                    character: r.character,
                    billing_order: r.billing_order,
                })
            })
            .collect()
    }
}

#[async_trait]
impl MovieRepository for SqlMovieRepository {
    async fn get(&self, id: MovieId) -> Result<Movie, RepositoryError> {
        query_as::<_, MovieRecord>(&format!("SELECT {MOVIE_COLUMNS} FROM movies m WHERE m.id = ?"))
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .map(MovieRecord::into_domain)
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_tmdb_id(&self, tmdb_id: i64) -> Result<Movie, RepositoryError> {
        query_as::<_, MovieRecord>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies m WHERE m.tmdb_id = ?"
        ))
        .bind(tmdb_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .map(MovieRecord::into_domain)
        .ok_or(RepositoryError::NotFound)
    }

    async fn get_with_details(&self, id: MovieId) -> Result<MovieWithDetails, RepositoryError> {
        let movie = self.get(id).await?;
        let genres = self.fetch_genres(id).await?;
        let cast = self.fetch_cast(id).await?;
        Ok(MovieWithDetails {
            movie,
            genres,
            cast,
        })
    }

    async fn upsert(&self, movie: NewMovie) -> Result<Movie, RepositoryError> {
        let movie = movie.normalize();
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let movie_id: i64 = query_scalar(
            r"INSERT INTO movies
                (tmdb_id, title, original_title, overview, release_date, runtime, poster_path, created_at)
              VALUES (?, ?, ?, ?, ?, ?, ?, ?)
              ON CONFLICT(tmdb_id) DO UPDATE SET
                title = excluded.title,
                original_title = excluded.original_title,
                overview = excluded.overview,
                release_date = excluded.release_date,
                runtime = excluded.runtime,
                poster_path = excluded.poster_path
              RETURNING id",
        )
        .bind(movie.tmdb_id)
        .bind(&movie.title)
        .bind(&movie.original_title)
        .bind(&movie.overview)
        .bind(movie.release_date)
        .bind(movie.runtime)
        .bind(&movie.poster_path)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        query("DELETE FROM movie_genres WHERE movie_id = ?")
            .bind(movie_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        for genre in &movie.genres {
            let genre_id: i64 = query_scalar(
                "INSERT INTO genres (tmdb_id, name) VALUES (?, ?) \
                 ON CONFLICT(tmdb_id) DO UPDATE SET name = excluded.name RETURNING id",
            )
            .bind(genre.tmdb_id)
            .bind(&genre.name)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;

            query("INSERT OR IGNORE INTO movie_genres (movie_id, genre_id) VALUES (?, ?)")
                .bind(movie_id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
        }

        query("DELETE FROM movie_cast WHERE movie_id = ?")
            .bind(movie_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        for member in &movie.cast {
            let person_id: i64 = query_scalar(
                r"INSERT INTO people (tmdb_id, name, gender, profile_path) VALUES (?, ?, ?, ?)
                  ON CONFLICT(tmdb_id) DO UPDATE SET
                    name = excluded.name,
                    gender = excluded.gender,
                    profile_path = excluded.profile_path
                  RETURNING id",
            )
            .bind(member.person.tmdb_id)
            .bind(&member.person.name)
            .bind(member.person.gender.as_str())
            .bind(&member.person.profile_path)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;

            query(
                "INSERT OR IGNORE INTO movie_cast (movie_id, person_id, character, billing_order) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(movie_id)
            .bind(person_id)
            .bind(&member.character)
            .bind(member.billing_order)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;

        self.get(MovieId::new(movie_id)).await
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MovieRecord {
    id: i64,
    tmdb_id: i64,
    title: String,
    original_title: Option<String>,
    overview: Option<String>,
    release_date: Option<NaiveDate>,
    runtime: Option<i64>,
    poster_path: Option<String>,
    created_at: DateTime<Utc>,
}

impl MovieRecord {
    pub(crate) fn into_domain(self) -> Movie {
        Movie {
            id: MovieId::new(self.id),
            tmdb_id: self.tmdb_id,
            title: self.title,
            original_title: self.original_title,
            overview: self.overview,
            release_date: self.release_date,
            runtime: self.runtime,
            poster_path: self.poster_path,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GenreRecord {
    id: i64,
    tmdb_id: i64,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct CastRecord {
    id: i64,
    tmdb_id: i64,
    name: String,
    gender: String,
    profile_path: Option<String>,
    character: Option<String>,
    billing_order: i64,
}
