//! Semantic retrieval over extracted text units.
//!
//! This module provides local semantic search using fastembed-rs for
//! generating embeddings and an exhaustive cosine-similarity scan.
//!
//! # Architecture
//!
//! - `embeddings`: provider trait and the fastembed wrapper
//! - `ranker`: cosine similarity and top-k selection
//! - `results`: joins ranked indices back to their units
//! - `pipeline`: embed corpus, embed query, rank, assemble

pub mod embeddings;
mod pipeline;
mod ranker;
mod results;

pub use embeddings::{EmbeddingError, EmbeddingModel, EmbeddingProvider, SUPPORTED_MODELS};
pub use pipeline::{SearchError, SearchPipeline};
pub use ranker::{Ranker, DEFAULT_TOP_K};
pub use results::RankedResult;

/// Default embedding model name, the sentence-transformers MiniLM
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";
