use std::cmp::Ordering;

use super::vectorizer::TermMatrix;

/// A neighboring row and its cosine similarity to the query row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub score: f64,
}

/// Dense pairwise cosine similarity over every row of a term matrix
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityIndex {
    /// Computes the full similarity matrix.
    ///
    /// Rows are unit-normalized, so cosine similarity is the dot product.
    /// Only row pairs sharing a term are visited, through per-column postings.
    /// The diagonal is fixed at 1.0.
    pub fn build(matrix: &TermMatrix) -> Self {
        let size = matrix.len();
        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); matrix.vocabulary.len()];
        for (row, vector) in matrix.rows.iter().enumerate() {
            for &(col, weight) in vector.entries() {
                postings[col].push((row, weight));
            }
        }

        let mut scores = vec![0.0; size * size];
        for (row, vector) in matrix.rows.iter().enumerate() {
            let line = &mut scores[row * size..(row + 1) * size];
            // Ascending column order makes (i, j) and (j, i) sum identical terms identically
            for &(col, weight) in vector.entries() {
                for &(other, other_weight) in &postings[col] {
                    line[other] += weight * other_weight;
                }
            }
            line[row] = 1.0;
        }

        Self { size, scores }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn similarity(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.scores[i * self.size + j])
        } else {
            None
        }
    }

    /// The `k` rows most similar to `row`, excluding `row` itself.
    ///
    /// Ordered by descending score; equal scores keep ascending row order.
    /// Returns `None` when `row` is out of range.
    pub fn neighbors(&self, row: usize, k: usize) -> Option<Vec<Neighbor>> {
        if row >= self.size {
            return None;
        }

        let line = &self.scores[row * self.size..(row + 1) * self.size];
        let mut candidates: Vec<Neighbor> = line
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != row)
            .map(|(other, &score)| Neighbor { row: other, score })
            .collect();

        if k < candidates.len() {
            candidates.select_nth_unstable_by(k, rank);
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(rank);

        Some(candidates)
    }
}

fn rank(a: &Neighbor, b: &Neighbor) -> Ordering {
    b.score.total_cmp(&a.score).then(a.row.cmp(&b.row))
}
