//! Immutable in-memory film catalog.
//!
//! Rows are loaded once and never mutated. Row `i` is the identity every
//! derived structure (term matrix, similarity matrix, title index) refers to.

use std::path::Path;

use thiserror::Error;

use crate::models::Film;

pub mod loader;

/// Error types for catalog loading
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog '{path}': {message}")]
    Open { path: String, message: String },

    #[error("Catalog is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Malformed catalog row: {0}")]
    Csv(#[from] csv::Error),
}

/// Lowercased copies of the searchable text columns
#[derive(Debug, Clone)]
struct SearchColumns {
    title: String,
    actors: Option<String>,
    director: Option<String>,
}

impl From<&Film> for SearchColumns {
    fn from(film: &Film) -> Self {
        Self {
            title: film.title.to_lowercase(),
            actors: film.actors.as_ref().map(|a| a.to_lowercase()),
            director: film.director.as_ref().map(|d| d.to_lowercase()),
        }
    }
}

/// The film table, indexed by row
#[derive(Debug, Clone)]
pub struct Catalog {
    films: Vec<Film>,
    search: Vec<SearchColumns>,
}

impl Catalog {
    /// Builds a catalog from rows in their canonical order
    pub fn new(films: Vec<Film>) -> Self {
        let search = films.iter().map(SearchColumns::from).collect();
        Self { films, search }
    }

    /// Loads the catalog from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let films = loader::load_films(path)?;
        Ok(Self::new(films))
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Film at a row index
    pub fn get(&self, row: usize) -> Option<&Film> {
        self.films.get(row)
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    /// Titles in row order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.films.iter().map(|f| f.title.as_str())
    }

    /// First film whose title equals `title`, ignoring case
    pub fn find_by_title_ignore_case(&self, title: &str) -> Option<&Film> {
        let needle = title.to_lowercase();
        self.search
            .iter()
            .position(|s| s.title == needle)
            .map(|row| &self.films[row])
    }

    /// Films whose actor list contains `name`, ignoring case
    pub fn films_with_actor(&self, name: &str) -> Vec<&Film> {
        let needle = name.to_lowercase();
        self.matching(|s| s.actors.as_deref().is_some_and(|a| a.contains(&needle)))
    }

    /// Films whose director contains `name`, ignoring case
    pub fn films_by_director(&self, name: &str) -> Vec<&Film> {
        let needle = name.to_lowercase();
        self.matching(|s| s.director.as_deref().is_some_and(|d| d.contains(&needle)))
    }

    fn matching<F>(&self, predicate: F) -> Vec<&Film>
    where
        F: Fn(&SearchColumns) -> bool,
    {
        self.search
            .iter()
            .zip(&self.films)
            .filter(|(s, _)| predicate(s))
            .map(|(_, film)| film)
            .collect()
    }
}
