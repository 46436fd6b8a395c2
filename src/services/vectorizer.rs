//! TF-IDF vectorization of film titles.
//!
//! Builds a lexicographically ordered vocabulary from the whole title corpus,
//! weights each term with a smoothed IDF and produces one L2-normalized sparse
//! vector per title. Row order of the output matches the input order.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::recommender::RecommenderError;

/// A sparse vector: `(column, weight)` pairs in ascending column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product over the shared columns
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Distinct corpus terms with their IDF weights
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    columns: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column assigned to a term
    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    pub fn idf(&self, column: usize) -> Option<f64> {
        self.idf.get(column).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Output of a fit pass: the vocabulary plus one vector per document
#[derive(Debug, Clone)]
pub struct TermMatrix {
    pub vocabulary: Vocabulary,
    pub rows: Vec<SparseVector>,
}

impl TermMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// TF-IDF vectorizer with a fixed stopword set
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    stopwords: HashSet<String>,
}

impl TfidfVectorizer {
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Lowercases, splits on non-word characters, drops short tokens and stopwords
    pub fn tokenize<'a>(&'a self, text: &str) -> impl Iterator<Item = String> + 'a {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() >= 2)
            .map(String::from)
            .collect::<Vec<_>>()
            .into_iter()
            .filter(move |t| !self.stopwords.contains(t))
    }

    /// Builds the vocabulary from every document and vectorizes each one.
    ///
    /// IDF is `ln((1 + n) / (1 + df)) + 1`; vectors are L2-normalized, so a
    /// document with no vocabulary terms yields an empty vector.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TermMatrix, RecommenderError> {
        let counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = BTreeMap::new();
                for token in self.tokenize(doc.as_ref()) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(RecommenderError::EmptyCorpus);
        }

        let n = documents.len() as f64;
        let terms: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let columns: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();

        // BTreeMap iteration keeps each row's columns ascending
        let rows = counts
            .iter()
            .map(|tf| {
                let mut vector = SparseVector {
                    entries: tf
                        .iter()
                        .map(|(term, &count)| {
                            let col = columns[term.as_str()];
                            (col, count as f64 * idf[col])
                        })
                        .collect(),
                };
                vector.normalize();
                vector
            })
            .collect();

        Ok(TermMatrix {
            vocabulary: Vocabulary {
                terms,
                columns,
                idf,
            },
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::new(["the", "and", "in", "of"])
    }

    #[test]
    fn test_tokenize_lowercases_and_filters() {
        let tokens: Vec<String> = vectorizer()
            .tokenize("The Lord of the Rings: The Return of a King")
            .collect();
        assert_eq!(tokens, vec!["lord", "rings", "return", "king"]);
    }

    #[test]
    fn test_tokenize_keeps_unicode_words() {
        let tokens: Vec<String> = vectorizer().tokenize("Amélie & Señor_X 2").collect();
        assert_eq!(tokens, vec!["amélie", "señor_x"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let matrix = vectorizer()
            .fit_transform(&["Toy Story", "Toy Story 2", "Heat"])
            .unwrap();
        assert_eq!(matrix.vocabulary.terms(), &["heat", "story", "toy"]);
        assert_eq!(matrix.vocabulary.column("story"), Some(1));
        assert_eq!(matrix.vocabulary.term(1), Some("story"));
        assert_eq!(matrix.vocabulary.term(3), None);
        assert_eq!(matrix.len(), 3);
    }

    #[test]
    fn test_smoothed_idf() {
        let matrix = vectorizer()
            .fit_transform(&["Toy Story", "Toy Story 2", "Heat"])
            .unwrap();
        let vocab = &matrix.vocabulary;

        let toy = vocab.idf(vocab.column("toy").unwrap()).unwrap();
        let heat = vocab.idf(vocab.column("heat").unwrap()).unwrap();
        assert!((toy - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((heat - ((4.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let matrix = vectorizer()
            .fit_transform(&["Toy Story", "Story of a Toy Toy", "Heat"])
            .unwrap();
        for row in &matrix.rows {
            assert!((row.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_term_frequency_weights_repeated_terms() {
        let matrix = vectorizer().fit_transform(&["Toy Toy Story", "Heat"]).unwrap();
        let row = &matrix.rows[0];
        let toy = matrix.vocabulary.column("toy").unwrap();
        let story = matrix.vocabulary.column("story").unwrap();
        let weight = |col: usize| row.entries().iter().find(|(c, _)| *c == col).unwrap().1;
        assert!((weight(toy) / weight(story) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_stopword_only_title_gets_empty_vector() {
        let matrix = vectorizer().fit_transform(&["The And", "Heat"]).unwrap();
        assert!(matrix.rows[0].is_empty());
        assert!(!matrix.rows[1].is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let result = vectorizer().fit_transform(&["the", "of and in", "a"]);
        assert!(matches!(result, Err(RecommenderError::EmptyCorpus)));

        let result = vectorizer().fit_transform::<&str>(&[]);
        assert!(matches!(result, Err(RecommenderError::EmptyCorpus)));
    }

    #[test]
    fn test_sparse_dot() {
        let a = SparseVector {
            entries: vec![(0, 1.0), (2, 2.0), (5, 3.0)],
        };
        let b = SparseVector {
            entries: vec![(1, 4.0), (2, 0.5), (5, 2.0)],
        };
        assert_eq!(a.dot(&b), 7.0);
        assert_eq!(a.dot(&SparseVector::default()), 0.0);
    }
}
