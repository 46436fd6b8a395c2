use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod film;

pub use film::Film;

/// Minimum number of votes for a film to be reported by the votes endpoint
pub const MIN_REPORTED_VOTES: u64 = 2000;

// ============================================================================
// Catalog query responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekdayCount {
    pub weekday: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleScore {
    pub title: String,
    pub release_year: i32,
    pub popularity: f64,
}

/// Vote statistics for a title, or a notice that the title has too few votes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TitleVotes {
    Reported {
        title: String,
        release_year: i32,
        vote_count: u64,
        vote_average: f64,
    },
    Insufficient {
        message: String,
    },
}

impl TitleVotes {
    pub fn insufficient(title: &str) -> Self {
        TitleVotes::Insufficient {
            message: format!(
                "'{}' has fewer than {} votes and is excluded from reporting",
                title, MIN_REPORTED_VOTES
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActorStats {
    pub actor: String,
    pub film_count: usize,
    pub total_return: f64,
    pub average_return: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectorFilm {
    pub title: String,
    pub release_date: Option<NaiveDate>,
    #[serde(rename = "return")]
    pub return_ratio: f64,
    pub budget: f64,
    pub revenue: f64,
}

impl From<&Film> for DirectorFilm {
    fn from(film: &Film) -> Self {
        Self {
            title: film.title.clone(),
            release_date: film.release_date,
            return_ratio: film.return_ratio,
            budget: film.budget,
            revenue: film.revenue,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectorStats {
    pub director: String,
    pub total_return: f64,
    pub films: Vec<DirectorFilm>,
}

// ============================================================================
// Recommendation responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    /// Title the recommendations were computed for
    pub title: String,
    /// Recommended titles, most similar first
    pub recommendations: Vec<String>,
}
