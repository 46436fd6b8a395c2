use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::CatalogError;
use crate::models::Film;

/// Columns the catalog file must provide
const REQUIRED_COLUMNS: [&str; 11] = [
    "title",
    "release_date",
    "release_year",
    "popularity",
    "vote_count",
    "vote_average",
    "names_actors",
    "name_director",
    "budget",
    "revenue",
    "return",
];

/// Row as it appears in the CSV, before normalization
///
/// Numeric columns are read as text so a single bad cell does not reject
/// the whole catalog.
#[derive(Debug, Deserialize)]
struct RawFilm {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    release_year: Option<String>,
    #[serde(default)]
    popularity: Option<String>,
    #[serde(default)]
    vote_count: Option<String>,
    #[serde(default)]
    vote_average: Option<String>,
    #[serde(default)]
    names_actors: Option<String>,
    #[serde(default)]
    name_director: Option<String>,
    #[serde(default)]
    budget: Option<String>,
    #[serde(default)]
    revenue: Option<String>,
    #[serde(default, rename = "return")]
    return_ratio: Option<String>,
}

/// Counts of recovered cells across a load
#[derive(Debug, Default)]
struct LoadStats {
    undated: usize,
    invalid_numbers: usize,
}

impl LoadStats {
    /// Parses a numeric cell; empty cells are 0, unparsable ones are 0 and counted
    fn number(&mut self, cell: Option<&str>) -> f64 {
        match cell.map(str::trim).filter(|c| !c.is_empty()) {
            None => 0.0,
            Some(c) => match c.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    self.invalid_numbers += 1;
                    0.0
                }
            },
        }
    }
}

impl RawFilm {
    fn into_film(self, stats: &mut LoadStats) -> Film {
        let release_date = self.release_date.as_deref().and_then(parse_release_date);
        if release_date.is_none() {
            stats.undated += 1;
        }

        Film {
            release_date,
            release_year: stats.number(self.release_year.as_deref()) as i32,
            popularity: stats.number(self.popularity.as_deref()),
            vote_count: stats.number(self.vote_count.as_deref()).max(0.0) as u64,
            vote_average: stats.number(self.vote_average.as_deref()),
            budget: stats.number(self.budget.as_deref()),
            revenue: stats.number(self.revenue.as_deref()),
            return_ratio: stats.number(self.return_ratio.as_deref()),
            title: self.title.unwrap_or_default(),
            actors: non_empty(self.names_actors),
            director: non_empty(self.name_director),
        }
    }
}

/// Reads every film from a CSV file, preserving row order
pub fn load_films<P: AsRef<Path>>(path: P) -> Result<Vec<Film>, CatalogError> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path).map_err(|e| CatalogError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    read_films(reader)
}

/// Reads every film from any CSV source, preserving row order
pub fn read_films_from<R: Read>(source: R) -> Result<Vec<Film>, CatalogError> {
    read_films(csv::Reader::from_reader(source))
}

fn read_films<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Film>, CatalogError> {
    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(CatalogError::MissingColumn(missing.to_string()));
    }

    let mut films = Vec::new();
    let mut stats = LoadStats::default();

    for record in reader.deserialize::<RawFilm>() {
        films.push(record?.into_film(&mut stats));
    }

    if stats.undated > 0 {
        tracing::warn!(
            undated = stats.undated,
            "Films with missing or unparsable release dates"
        );
    }
    if stats.invalid_numbers > 0 {
        tracing::warn!(
            cells = stats.invalid_numbers,
            "Unparsable numeric cells replaced with 0"
        );
    }

    Ok(films)
}

/// Parses `YYYY-MM-DD` or an ISO timestamp on that date; anything else is `None`
fn parse_release_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    match value.as_bytes().get(10) {
        None => NaiveDate::parse_from_str(value, "%Y-%m-%d").ok(),
        Some(b'T') | Some(b' ') => ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|dt| dt.date())
            .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive())),
        Some(_) => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
