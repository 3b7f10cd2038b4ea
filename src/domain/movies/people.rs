use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::ids::PersonId;

/// Gender as reported by the metadata provider.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Unknown,
    Female,
    Male,
    NonBinary,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Unknown => "unknown",
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::NonBinary => "non_binary",
        }
    }

    /// Map a TMDB gender code (0 unknown, 1 female, 2 male, 3 non-binary).
    pub fn from_tmdb_code(code: i64) -> Self {
        match code {
            1 => Gender::Female,
            2 => Gender::Male,
            3 => Gender::NonBinary,
            _ => Gender::Unknown,
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Gender::Unknown),
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            "non_binary" => Ok(Gender::NonBinary),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub tmdb_id: i64,
    pub name: String,
    pub gender: Gender,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
    pub tmdb_id: i64,
    pub name: String,
    pub gender: Gender,
    pub profile_path: Option<String>,
}

/// A person's appearance in a movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub person: Person,
    pub character: Option<String>,
    pub billing_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCastMember {
    pub person: NewPerson,
    pub character: Option<String>,
    pub billing_order: i64,
}
