use serde::{Deserialize, Serialize};

use crate::domain::ids::GenreId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub tmdb_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGenre {
    pub tmdb_id: i64,
    pub name: String,
}

impl NewGenre {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}
