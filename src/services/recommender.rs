use std::time::Instant;

use thiserror::Error;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::Recommendations,
};

use super::{
    similarity::{Neighbor, SimilarityIndex},
    title_index::TitleIndex,
    vectorizer::TfidfVectorizer,
};

/// Number of titles returned by a recommendation query
pub const RECOMMENDATION_COUNT: usize = 5;

/// Error types for building the recommendation model
#[derive(Debug, Error)]
pub enum RecommenderError {
    #[error("No usable vocabulary: every title is empty after stopword filtering")]
    EmptyCorpus,

    #[error("{structure} has {actual} rows but the catalog has {expected}")]
    Misaligned {
        structure: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Content-based recommender over catalog titles
///
/// The similarity matrix and title index are derived from the same ordered
/// title sequence, so row `i` means the same film in both and in the catalog.
#[derive(Debug, Clone)]
pub struct Recommender {
    similarity: SimilarityIndex,
    titles: TitleIndex,
    vocabulary_size: usize,
}

impl Recommender {
    /// Vectorizes every catalog title and computes the similarity matrix
    pub fn build<I, S>(catalog: &Catalog, stopwords: I) -> Result<Self, RecommenderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let titles: Vec<&str> = catalog.titles().collect();

        let matrix = TfidfVectorizer::new(stopwords).fit_transform(&titles)?;
        check_alignment("Term matrix", catalog.len(), matrix.len())?;

        let similarity = SimilarityIndex::build(&matrix);
        check_alignment("Similarity matrix", catalog.len(), similarity.len())?;

        let title_index = TitleIndex::new(titles.iter().copied());
        check_alignment("Title index", catalog.len(), title_index.len())?;

        tracing::info!(
            films = catalog.len(),
            distinct_titles = title_index.distinct_titles(),
            vocabulary = matrix.vocabulary.len(),
            build_time_ms = start.elapsed().as_millis(),
            "Recommendation model built"
        );

        Ok(Self {
            similarity,
            titles: title_index,
            vocabulary_size: matrix.vocabulary.len(),
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn similarity(&self) -> &SimilarityIndex {
        &self.similarity
    }

    pub fn resolve(&self, title: &str) -> AppResult<usize> {
        self.titles.resolve(title)
    }

    /// The `k` rows most similar to `title`'s row
    pub fn similar_rows(&self, title: &str, k: usize) -> AppResult<Vec<Neighbor>> {
        let row = self.resolve(title)?;
        self.similarity
            .neighbors(row, k)
            .ok_or_else(|| AppError::Internal(format!("Row {} outside similarity matrix", row)))
    }

    /// Recommends titles similar to `title`, most similar first.
    ///
    /// Output is not deduplicated: repeated catalog titles at different rows
    /// can both appear.
    pub fn recommend(&self, catalog: &Catalog, title: &str) -> AppResult<Recommendations> {
        let neighbors = self.similar_rows(title, RECOMMENDATION_COUNT)?;

        let recommendations = neighbors
            .iter()
            .map(|n| {
                catalog
                    .get(n.row)
                    .map(|film| film.title.clone())
                    .ok_or_else(|| AppError::Internal(format!("Row {} outside catalog", n.row)))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Recommendations {
            title: title.to_string(),
            recommendations,
        })
    }
}

fn check_alignment(
    structure: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), RecommenderError> {
    if expected == actual {
        Ok(())
    } else {
        Err(RecommenderError::Misaligned {
            structure,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Film;

    const STOPWORDS: [&str; 4] = ["the", "and", "in", "of"];

    fn catalog(titles: &[&str]) -> Catalog {
        Catalog::new(titles.iter().map(|t| Film::new(*t)).collect())
    }

    fn fixture() -> Catalog {
        catalog(&[
            "Toy Story",
            "Jumanji",
            "Toy Story 2",
            "The Dark Knight",
            "Batman Begins",
            "The Dark Knight Rises",
            "Knight and Day",
            "Jumanji",
            "Dark City",
        ])
    }

    #[test]
    fn test_resolve_then_lookup_round_trips() {
        let catalog = fixture();
        let recommender = Recommender::build(&catalog, STOPWORDS).unwrap();
        for film in catalog.films() {
            let row = recommender.resolve(&film.title).unwrap();
            assert_eq!(catalog.get(row).unwrap().title, film.title);
        }
        // Duplicate resolves to the first occurrence
        assert_eq!(recommender.resolve("Jumanji").unwrap(), 1);
    }

    #[test]
    fn test_recommend_most_similar_first() {
        let catalog = fixture();
        let recommender = Recommender::build(&catalog, STOPWORDS).unwrap();

        let result = recommender.recommend(&catalog, "The Dark Knight").unwrap();

        assert_eq!(result.title, "The Dark Knight");
        assert_eq!(result.recommendations.len(), RECOMMENDATION_COUNT);
        assert_eq!(result.recommendations[0], "The Dark Knight Rises");
        assert!(!result.recommendations.contains(&"The Dark Knight".to_string()));
    }

    #[test]
    fn test_recommend_excludes_own_row_and_is_ordered() {
        let catalog = fixture();
        let recommender = Recommender::build(&catalog, STOPWORDS).unwrap();

        for film in catalog.films() {
            let row = recommender.resolve(&film.title).unwrap();
            let neighbors = recommender
                .similar_rows(&film.title, RECOMMENDATION_COUNT)
                .unwrap();
            assert!(neighbors.len() <= RECOMMENDATION_COUNT);
            assert!(neighbors.iter().all(|n| n.row != row));
            for pair in neighbors.windows(2) {
                assert!(
                    pair[0].score > pair[1].score
                        || (pair[0].score == pair[1].score && pair[0].row < pair[1].row)
                );
            }
        }
    }

    #[test]
    fn test_similarity_matrix_spans_catalog() {
        let catalog = fixture();
        let recommender = Recommender::build(&catalog, STOPWORDS).unwrap();
        let similarity = recommender.similarity();

        assert_eq!(similarity.len(), catalog.len());
        for row in 0..catalog.len() {
            assert_eq!(similarity.similarity(row, row), Some(1.0));
        }
        // Both "Jumanji" rows share one vector
        let jumanji = similarity.similarity(1, 7).unwrap();
        assert!((jumanji - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_recommend_keeps_duplicate_titles() {
        let catalog = catalog(&["Hamlet", "Hamlet", "Hamlet", "Macbeth"]);
        let recommender = Recommender::build(&catalog, STOPWORDS).unwrap();

        let result = recommender.recommend(&catalog, "Hamlet").unwrap();
        assert_eq!(result.recommendations, vec!["Hamlet", "Hamlet", "Macbeth"]);
    }

    #[test]
    fn test_recommend_unknown_title() {
        let catalog = fixture();
        let recommender = Recommender::build(&catalog, STOPWORDS).unwrap();
        let err = recommender.recommend(&catalog, "toy story").unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg.contains("toy story")));
    }

    #[test]
    fn test_build_rejects_empty_vocabulary() {
        let catalog = catalog(&["The", "And Of", "A"]);
        let result = Recommender::build(&catalog, STOPWORDS);
        assert!(matches!(result, Err(RecommenderError::EmptyCorpus)));
    }

    #[test]
    fn test_custom_stopwords() {
        let catalog = fixture();
        let recommender = Recommender::build(&catalog, ["dark", "knight"]).unwrap();
        // "the" is a regular term now, "dark" and "knight" are gone
        let neighbors = recommender.similar_rows("The Dark Knight", 1).unwrap();
        assert_eq!(neighbors[0].row, 5);
        assert!(recommender.vocabulary_size() > 0);
    }
}
