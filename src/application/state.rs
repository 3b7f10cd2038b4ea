use std::sync::Arc;

use crate::application::services::MovieService;
use crate::domain::metadata::MovieMetadataProvider;
use crate::domain::repositories::{
    ListRepository, MovieRepository, StatsRepository, TokenRepository, UserRepository,
    WatchedRepository,
};
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::lists::SqlListRepository;
use crate::infrastructure::repositories::movies::movies::SqlMovieRepository;
use crate::infrastructure::repositories::stats::SqlStatsRepository;
use crate::infrastructure::repositories::tokens::SqlTokenRepository;
use crate::infrastructure::repositories::users::SqlUserRepository;
use crate::infrastructure::repositories::watched::SqlWatchedRepository;

/// External collaborators that differ between production and tests.
/// Repositories and services are created from the database pool.
pub struct AppStateConfig {
    pub metadata_provider: Arc<dyn MovieMetadataProvider>,
}

#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub token_repo: Arc<dyn TokenRepository>,
    pub movie_repo: Arc<dyn MovieRepository>,
    pub watched_repo: Arc<dyn WatchedRepository>,
    pub list_repo: Arc<dyn ListRepository>,
    pub stats_repo: Arc<dyn StatsRepository>,
    pub movie_service: MovieService,
}

impl AppState {
    pub fn from_database(database: &Database, config: AppStateConfig) -> Self {
        let pool = database.clone_pool();

        let user_repo: Arc<dyn UserRepository> = Arc::new(SqlUserRepository::new(pool.clone()));
        let token_repo: Arc<dyn TokenRepository> = Arc::new(SqlTokenRepository::new(pool.clone()));
        let movie_repo: Arc<dyn MovieRepository> = Arc::new(SqlMovieRepository::new(pool.clone()));
        let watched_repo: Arc<dyn WatchedRepository> =
            Arc::new(SqlWatchedRepository::new(pool.clone()));
        let list_repo: Arc<dyn ListRepository> = Arc::new(SqlListRepository::new(pool.clone()));
        let stats_repo: Arc<dyn StatsRepository> = Arc::new(SqlStatsRepository::new(pool));

        let movie_service = MovieService::new(Arc::clone(&movie_repo), config.metadata_provider);

        Self {
            user_repo,
            token_repo,
            movie_repo,
            watched_repo,
            list_repo,
            stats_repo,
            movie_service,
        }
    }
}
