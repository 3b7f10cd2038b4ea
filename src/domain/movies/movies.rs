use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::MovieId;
use crate::domain::movies::genres::{Genre, NewGenre};
use crate::domain::movies::people::{CastMember, NewCastMember};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub tmdb_id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes.
    pub runtime: Option<i64>,
    pub poster_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Movie with its genres and billed cast, as served by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieWithDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: Vec<Genre>,
    pub cast: Vec<CastMember>,
}

/// Everything needed to cache a movie fetched from the metadata provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovie {
    pub tmdb_id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<NewGenre>,
    #[serde(default)]
    pub cast: Vec<NewCastMember>,
}

impl NewMovie {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.original_title = self
            .original_title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && *t != self.title);
        self.overview = self
            .overview
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());
        self.runtime = self.runtime.filter(|r| *r > 0);
        self.genres = self.genres.into_iter().map(NewGenre::normalize).collect();
        self
    }
}
