use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{MovieId, PersonId};
use crate::domain::movies::people::Gender;

/// A labelled time bucket and its measure. Labels sort chronologically when
/// compared lexicographically (`YYYY-MM`, `YYYY`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period<T> {
    pub label: String,
    pub value: T,
}

impl<T> Period<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

pub type PeriodCount = Period<i64>;
pub type PeriodHours = Period<f64>;

/// Time bucketing for watched-count series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodGranularity {
    /// `YYYY-MM` buckets covering the current month and the eleven before it.
    MonthLastYear,
    /// `YYYY` buckets over all time.
    Year,
    /// Weekday names, Sunday first.
    Weekday,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// Watched-event count for a genre. A movie with several genres counts
/// towards each of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub name: String,
    pub count: u64,
}

impl GenreCount {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Per-genre counts for one `YYYY-MM` month, keyed by genre name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlyGenreBreakdown {
    pub month: String,
    pub genres: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopDay {
    pub date: NaiveDate,
    pub count: u64,
}

/// Actor ranked by the number of distinct watched movies they appear in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopActor {
    pub person_id: PersonId,
    pub name: String,
    pub profile_path: Option<String>,
    pub gender: Gender,
    pub count: u64,
}

/// Earliest and latest watched date. Both bounds are `None` when the user
/// has not watched anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WatchAverages {
    pub per_day: f64,
    pub per_week: f64,
    pub per_month: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    #[default]
    Neutral,
}

/// Movement between the two most recent periods of a series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Trend<T> {
    pub direction: TrendDirection,
    pub value: T,
}

/// Everything shown on the stats page for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchedStatsReport {
    pub total_watched: u64,
    pub total_hours: f64,
    pub theater_vs_home: Vec<LabelCount>,
    /// Watched counts for the last twelve months.
    pub monthly_watched: Vec<PeriodCount>,
    /// Hours watched for the last twelve months.
    pub monthly_hours: Vec<PeriodHours>,
    pub yearly_watched: Vec<PeriodCount>,
    /// Sunday-first weekday distribution.
    pub weekday_watched: Vec<PeriodCount>,
    /// Top genres plus an "Others" bucket.
    pub genres: Vec<GenreCount>,
    pub monthly_genres: Vec<MonthlyGenreBreakdown>,
    pub top_movies: Vec<TopMovie>,
    pub most_watched_day: Option<TopDay>,
    pub top_actors: Vec<TopActor>,
    pub date_range: Option<DateRange>,
    pub averages: WatchAverages,
    pub hours_averages: WatchAverages,
    pub movies_trend: Trend<i64>,
    pub hours_trend: Trend<f64>,
}
