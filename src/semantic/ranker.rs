//! Exhaustive cosine-similarity ranking.
//!
//! Scores the query against every corpus vector and keeps the `top_k` best.
//! Corpus sizes are a handful of documents, so a full scan and a stable sort
//! are enough.

/// Default number of results
pub const DEFAULT_TOP_K: usize = 10;

/// A ranked corpus entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Position of the unit in the corpus
    pub index: usize,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("Dimension mismatch at corpus index {index}: expected {expected}, got {got}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
}

#[derive(Debug, Clone)]
pub struct Ranker {
    top_k: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl Ranker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Rank `corpus` against `query`.
    ///
    /// Returns at most `top_k` hits with non-increasing scores. Equal scores
    /// keep ascending corpus order.
    pub fn rank(&self, query: &[f32], corpus: &[Vec<f32>]) -> Result<Vec<Hit>, RankError> {
        let query_norm = l2_norm(query);

        let mut hits = Vec::with_capacity(corpus.len());
        for (index, vector) in corpus.iter().enumerate() {
            if vector.len() != query.len() {
                return Err(RankError::DimensionMismatch {
                    index,
                    expected: query.len(),
                    got: vector.len(),
                });
            }
            hits.push(Hit {
                index,
                score: cosine_with_norm(query, query_norm, vector),
            });
        }

        // sort_by is stable, ties stay in corpus order
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(self.top_k);

        Ok(hits)
    }
}

/// Compute L2 norm of a vector.
fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity of two vectors of equal length.
///
/// Vectors with a norm of exactly zero score 0 against everything. Any other
/// vector, however small, is scored on direction alone.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    cosine_with_norm(a, l2_norm(a), b)
}

fn cosine_with_norm(query: &[f32], query_norm: f32, target: &[f32]) -> f32 {
    let target_norm = l2_norm(target);
    if query_norm == 0.0 || target_norm == 0.0 {
        return 0.0;
    }

    let dot: f32 = query.iter().zip(target.iter()).map(|(a, b)| a * b).sum();
    let score = dot / (query_norm * target_norm);

    if score.is_finite() {
        // float error can push parallel vectors just past 1; `+ 0.0` folds -0.0
        // into 0.0 so total_cmp treats them as a tie
        score.clamp(-1.0, 1.0) + 0.0
    } else {
        0.0
    }
}
