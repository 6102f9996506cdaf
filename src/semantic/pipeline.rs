//! Search pipeline: embed the corpus once, embed the query, rank, assemble.
//!
//! Each stage takes its inputs explicitly so it can be driven from the CLI
//! or from tests with any `EmbeddingProvider`.

use crate::document::TextUnit;

use super::embeddings::{EmbeddingError, EmbeddingProvider};
use super::ranker::{RankError, Ranker};
use super::results::{assemble, RankedResult};

/// Errors that can occur while building or searching a corpus.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("corpus is empty, nothing to search")]
    EmptyCorpus,

    #[error("embedding provider failed: {0}")]
    Provider(#[from] EmbeddingError),

    #[error("embedding provider returned {got} vectors for {expected} inputs")]
    VectorCountMismatch { expected: usize, got: usize },

    #[error("ranking failed: {0}")]
    Rank(#[from] RankError),
}

/// Text units together with their embeddings, index-aligned.
#[derive(Debug, Clone)]
pub struct Corpus {
    units: Vec<TextUnit>,
    vectors: Vec<Vec<f32>>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

pub struct SearchPipeline<'a, P: EmbeddingProvider + ?Sized> {
    provider: &'a P,
    ranker: Ranker,
}

impl<'a, P: EmbeddingProvider + ?Sized> SearchPipeline<'a, P> {
    pub fn new(provider: &'a P, ranker: Ranker) -> Self {
        Self { provider, ranker }
    }

    /// Embed every unit in one provider call.
    pub fn index(&self, units: Vec<TextUnit>) -> Result<Corpus, SearchError> {
        if units.is_empty() {
            return Err(SearchError::EmptyCorpus);
        }

        let texts: Vec<String> = units.iter().map(|u| u.text.clone()).collect();
        log::info!(
            "embedding {} units with '{}'",
            texts.len(),
            self.provider.name()
        );

        let vectors = self.provider.encode(&texts)?;
        if vectors.len() != units.len() {
            return Err(SearchError::VectorCountMismatch {
                expected: units.len(),
                got: vectors.len(),
            });
        }

        Ok(Corpus { units, vectors })
    }

    /// Embed `query` and return the best matching units.
    pub fn search(&self, corpus: &Corpus, query: &str) -> Result<Vec<RankedResult>, SearchError> {
        let query_vector = self.provider.encode_one(query)?;
        let hits = self.ranker.rank(&query_vector, &corpus.vectors)?;

        log::debug!(
            "ranked {} of {} units for query {:?}",
            hits.len(),
            corpus.len(),
            query
        );

        Ok(assemble(&hits, &corpus.units))
    }

    /// `index` followed by `search`.
    pub fn run(&self, units: Vec<TextUnit>, query: &str) -> Result<Vec<RankedResult>, SearchError> {
        let corpus = self.index(units)?;
        self.search(&corpus, query)
    }
}
