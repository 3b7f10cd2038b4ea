use std::sync::Arc;

use tracing::info;

use crate::application::errors::AppError;
use crate::domain::RepositoryError;
use crate::domain::metadata::{MovieMetadataProvider, MovieSearchResult};
use crate::domain::movies::movies::{MovieWithDetails, NewMovie};
use crate::domain::repositories::MovieRepository;

/// Top-billed cast members kept per imported movie.
pub const MAX_CAST_MEMBERS: usize = 20;

/// Looks movies up at the metadata provider and caches them locally.
#[derive(Clone)]
pub struct MovieService {
    movie_repo: Arc<dyn MovieRepository>,
    metadata: Arc<dyn MovieMetadataProvider>,
}

impl MovieService {
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        metadata: Arc<dyn MovieMetadataProvider>,
    ) -> Self {
        Self {
            movie_repo,
            metadata,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, title: &str) -> Result<Vec<MovieSearchResult>, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::validation("search query must not be empty"));
        }
        Ok(self.metadata.search(title).await?)
    }

    /// Returns the locally cached movie, fetching and storing it first when
    /// it has not been seen before.
    #[tracing::instrument(skip(self))]
    pub async fn import(&self, tmdb_id: i64) -> Result<MovieWithDetails, AppError> {
        if tmdb_id <= 0 {
            return Err(AppError::validation("invalid tmdb id"));
        }

        match self.movie_repo.get_by_tmdb_id(tmdb_id).await {
            Ok(movie) => return Ok(self.movie_repo.get_with_details(movie.id).await?),
            Err(RepositoryError::NotFound) => {}
            Err(err) => return Err(err.into()),
        }

        let (details, mut cast) = tokio::try_join!(
            self.metadata.details(tmdb_id),
            self.metadata.credits(tmdb_id),
        )?;
        cast.sort_by_key(|member| member.billing_order);
        cast.truncate(MAX_CAST_MEMBERS);

        let new_movie = NewMovie {
            tmdb_id: details.tmdb_id,
            title: details.title,
            original_title: details.original_title,
            overview: details.overview,
            release_date: details.release_date,
            runtime: details.runtime,
            poster_path: details.poster_path,
            genres: details.genres,
            cast,
        };

        let movie = self.movie_repo.upsert(new_movie).await?;
        info!(movie_id = %movie.id, tmdb_id, title = %movie.title, "movie imported");

        Ok(self.movie_repo.get_with_details(movie.id).await?)
    }
}
