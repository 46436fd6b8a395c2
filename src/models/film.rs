use chrono::NaiveDate;
use serde::Serialize;

/// A single row of the film catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Film {
    /// Title as stored in the catalog (not unique)
    pub title: String,
    /// Release date, `None` when the source value was unparsable
    pub release_date: Option<NaiveDate>,
    pub release_year: i32,
    pub popularity: f64,
    pub vote_count: u64,
    pub vote_average: f64,
    /// Free-text list of actor names
    pub actors: Option<String>,
    pub director: Option<String>,
    pub budget: f64,
    pub revenue: f64,
    /// Revenue relative to budget
    #[serde(rename = "return")]
    pub return_ratio: f64,
}

impl Film {
    /// Creates a film with only a title set, mostly useful for fixtures
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            release_date: None,
            release_year: 0,
            popularity: 0.0,
            vote_count: 0,
            vote_average: 0.0,
            actors: None,
            director: None,
            budget: 0.0,
            revenue: 0.0,
            return_ratio: 0.0,
        }
    }
}
