use std::collections::HashMap;

use crate::error::{AppError, AppResult};

/// Exact-title lookup into the shared row space
///
/// Matching is case- and whitespace-sensitive. When a title repeats, the
/// first row keeps the entry and later rows are shadowed.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    rows: HashMap<String, usize>,
    len: usize,
}

impl TitleIndex {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows = HashMap::new();
        let mut len = 0;
        for (row, title) in titles.into_iter().enumerate() {
            rows.entry(title.into()).or_insert(row);
            len = row + 1;
        }
        Self { rows, len }
    }

    /// Row index of `title`, or `NotFound` naming the title
    pub fn resolve(&self, title: &str) -> AppResult<usize> {
        self.rows
            .get(title)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Film '{}' not found", title)))
    }

    /// Number of rows the index was built over, duplicates included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct titles
    pub fn distinct_titles(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_first_duplicate() {
        let index = TitleIndex::new(["Hamlet", "Heat", "Hamlet"]);
        assert_eq!(index.resolve("Hamlet").unwrap(), 0);
        assert_eq!(index.resolve("Heat").unwrap(), 1);
        assert_eq!(index.len(), 3);
        assert_eq!(index.distinct_titles(), 2);
    }

    #[test]
    fn test_resolve_is_exact() {
        let index = TitleIndex::new(["Heat"]);
        assert!(matches!(index.resolve("heat"), Err(AppError::NotFound(_))));
        assert!(matches!(index.resolve("Heat "), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_not_found_message_names_title() {
        let index = TitleIndex::new(Vec::<String>::new());
        let err = index.resolve("Nope").unwrap_err();
        assert!(err.to_string().contains("Nope"));
    }
}
