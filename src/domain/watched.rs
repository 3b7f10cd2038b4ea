use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{MovieId, UserId, WatchedId};

/// A single viewing of a movie by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Watched {
    pub id: WatchedId,
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub watched_on: NaiveDate,
    pub in_theater: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchedWithMovie {
    #[serde(flatten)]
    pub watched: Watched,
    pub movie_title: String,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewWatched {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub watched_on: NaiveDate,
    pub in_theater: bool,
}

impl NewWatched {
    /// Watched dates cannot lie in the future relative to `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        if self.watched_on > today {
            return Err(format!(
                "watched_on {} is in the future",
                self.watched_on.format("%Y-%m-%d")
            ));
        }
        Ok(())
    }
}
