use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::metadata::{
    MetadataError, MovieDetails, MovieMetadataProvider, MovieSearchResult,
};
use crate::domain::movies::genres::NewGenre;
use crate::domain::movies::people::{Gender, NewCastMember, NewPerson};

pub const TMDB_URL: &str = "https://api.themoviedb.org/3";
const USER_AGENT: &str = "Movielog/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for The Movie Database v3 API.
pub struct TmdbClient {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl TmdbClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> anyhow::Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("invalid TMDB url: {base_url}"))?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, MetadataError> {
        self.base_url
            .join(path)
            .map_err(|e| MetadataError::Request(format!("invalid TMDB path {path}: {e}")))
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, MetadataError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "requesting TMDB resource");

        let response = self
            .http
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| MetadataError::Request(format!("TMDB request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unreadable body)".to_string());
            return Err(MetadataError::Request(format!(
                "TMDB returned status {status}: {body}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| MetadataError::Request(format!("failed to read TMDB response: {e}")))?;
        serde_json::from_slice(&body).map_err(|e| MetadataError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MovieMetadataProvider for TmdbClient {
    #[tracing::instrument(skip(self))]
    async fn search(&self, title: &str) -> Result<Vec<MovieSearchResult>, MetadataError> {
        let page: SearchPage = self.get_json("search/movie", &[("query", title)]).await?;
        Ok(page.results.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn details(&self, tmdb_id: i64) -> Result<MovieDetails, MetadataError> {
        let movie: TmdbMovie = self.get_json(&format!("movie/{tmdb_id}"), &[]).await?;
        Ok(movie.into())
    }

    #[tracing::instrument(skip(self))]
    async fn credits(&self, tmdb_id: i64) -> Result<Vec<NewCastMember>, MetadataError> {
        let credits: TmdbCredits = self
            .get_json(&format!("movie/{tmdb_id}/credits"), &[])
            .await?;
        Ok(credits.cast.into_iter().map(Into::into).collect())
    }
}

/// TMDB sends `""` for unknown release dates.
fn parse_release_date(raw: Option<String>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

// --- TMDB API types ---

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<TmdbSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResult {
    id: i64,
    title: String,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
}

impl From<TmdbSearchResult> for MovieSearchResult {
    fn from(result: TmdbSearchResult) -> Self {
        Self {
            tmdb_id: result.id,
            title: result.title,
            release_date: parse_release_date(result.release_date),
            overview: non_empty(result.overview),
            poster_path: result.poster_path,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: i64,
    title: String,
    original_title: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    runtime: Option<i64>,
    poster_path: Option<String>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
}

impl From<TmdbMovie> for MovieDetails {
    fn from(movie: TmdbMovie) -> Self {
        Self {
            tmdb_id: movie.id,
            title: movie.title,
            original_title: movie.original_title,
            overview: non_empty(movie.overview),
            release_date: parse_release_date(movie.release_date),
            runtime: movie.runtime,
            poster_path: movie.poster_path,
            genres: movie
                .genres
                .into_iter()
                .map(|g| NewGenre {
                    tmdb_id: g.id,
                    name: g.name,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Deserialize)]
struct TmdbCastMember {
    id: i64,
    name: String,
    #[serde(default)]
    gender: i64,
    profile_path: Option<String>,
    character: Option<String>,
    #[serde(default)]
    order: i64,
}

impl From<TmdbCastMember> for NewCastMember {
    fn from(member: TmdbCastMember) -> Self {
        Self {
            person: NewPerson {
                tmdb_id: member.id,
                name: member.name,
                gender: Gender::from_tmdb_code(member.gender),
                profile_path: member.profile_path,
            },
            character: non_empty(member.character),
            billing_order: member.order,
        }
    }
}
