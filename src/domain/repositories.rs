use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::ids::{ListId, MovieId, TokenId, UserId, WatchedId};
use crate::domain::lists::{MovieList, MovieListWithMovies, NewMovieList};
use crate::domain::movies::movies::{Movie, MovieWithDetails, NewMovie};
use crate::domain::movies::people::Gender;
use crate::domain::stats::{
    DateRange, GenreCount, LabelCount, MonthlyGenreBreakdown, PeriodCount, PeriodGranularity,
    PeriodHours, TopActor, TopDay, TopMovie,
};
use crate::domain::tokens::{ApiToken, NewApiToken};
use crate::domain::users::{NewUser, User};
use crate::domain::watched::{NewWatched, Watched, WatchedWithMovie};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;
    async fn get(&self, id: UserId) -> Result<User, RepositoryError>;
    async fn get_by_username(&self, username: &str) -> Result<User, RepositoryError>;
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn insert(&self, token: NewApiToken) -> Result<ApiToken, RepositoryError>;
    async fn get_by_token_hash(&self, token_hash: &str) -> Result<ApiToken, RepositoryError>;
    async fn update_last_used(&self, id: TokenId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn get(&self, id: MovieId) -> Result<Movie, RepositoryError>;
    async fn get_by_tmdb_id(&self, tmdb_id: i64) -> Result<Movie, RepositoryError>;
    async fn get_with_details(&self, id: MovieId) -> Result<MovieWithDetails, RepositoryError>;
    /// Insert or refresh a movie together with its genres and cast.
    async fn upsert(&self, movie: NewMovie) -> Result<Movie, RepositoryError>;
}

#[async_trait]
pub trait WatchedRepository: Send + Sync {
    async fn insert(&self, watched: NewWatched) -> Result<Watched, RepositoryError>;
    async fn list_by_user(&self, user_id: UserId)
    -> Result<Vec<WatchedWithMovie>, RepositoryError>;
    /// Deletes only when the event belongs to `user_id`.
    async fn delete(&self, user_id: UserId, id: WatchedId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ListRepository: Send + Sync {
    async fn insert(&self, list: NewMovieList) -> Result<MovieList, RepositoryError>;
    async fn get(&self, user_id: UserId, id: ListId)
    -> Result<MovieListWithMovies, RepositoryError>;
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<MovieList>, RepositoryError>;
    async fn delete(&self, user_id: UserId, id: ListId) -> Result<(), RepositoryError>;
    async fn add_movie(
        &self,
        user_id: UserId,
        id: ListId,
        movie_id: MovieId,
    ) -> Result<(), RepositoryError>;
    async fn remove_movie(
        &self,
        user_id: UserId,
        id: ListId,
        movie_id: MovieId,
    ) -> Result<(), RepositoryError>;
}

/// Read-only aggregate queries over a user's watched events.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn count_watched(&self, user_id: UserId) -> Result<u64, RepositoryError>;
    async fn sum_hours_watched(&self, user_id: UserId) -> Result<f64, RepositoryError>;
    async fn theater_vs_home(&self, user_id: UserId) -> Result<Vec<LabelCount>, RepositoryError>;
    async fn period_counts(
        &self,
        user_id: UserId,
        granularity: PeriodGranularity,
    ) -> Result<Vec<PeriodCount>, RepositoryError>;
    async fn monthly_hours(&self, user_id: UserId) -> Result<Vec<PeriodHours>, RepositoryError>;
    /// Genre counts ranked by count, descending.
    async fn genre_counts(&self, user_id: UserId) -> Result<Vec<GenreCount>, RepositoryError>;
    async fn monthly_genre_breakdown(
        &self,
        user_id: UserId,
    ) -> Result<Vec<MonthlyGenreBreakdown>, RepositoryError>;
    async fn top_movies(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<TopMovie>, RepositoryError>;
    /// `None` when the user has no watched events.
    async fn most_watched_day(&self, user_id: UserId) -> Result<Option<TopDay>, RepositoryError>;
    async fn top_actors(
        &self,
        user_id: UserId,
        gender: Gender,
        limit: u32,
    ) -> Result<Vec<TopActor>, RepositoryError>;
    /// `None` when the user has no watched events.
    async fn watched_date_range(
        &self,
        user_id: UserId,
    ) -> Result<Option<DateRange>, RepositoryError>;
}
