use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::movies::genres::NewGenre;
use crate::domain::movies::people::NewCastMember;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("movie not found at metadata provider")]
    NotFound,
    #[error("metadata request failed: {0}")]
    Request(String),
    #[error("failed to decode metadata response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSearchResult {
    pub tmdb_id: i64,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub tmdb_id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub runtime: Option<i64>,
    pub poster_path: Option<String>,
    pub genres: Vec<NewGenre>,
}

/// Source of movie metadata (search, details and cast credits).
#[async_trait]
pub trait MovieMetadataProvider: Send + Sync {
    async fn search(&self, title: &str) -> Result<Vec<MovieSearchResult>, MetadataError>;
    async fn details(&self, tmdb_id: i64) -> Result<MovieDetails, MetadataError>;
    async fn credits(&self, tmdb_id: i64) -> Result<Vec<NewCastMember>, MetadataError>;
}
