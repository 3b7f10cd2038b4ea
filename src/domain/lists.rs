use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ListId, UserId};
use crate::domain::movies::movies::Movie;

/// A user-curated collection of movies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieList {
    pub id: ListId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieListWithMovies {
    #[serde(flatten)]
    pub list: MovieList,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Clone)]
pub struct NewMovieList {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
}

impl NewMovieList {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }
}
