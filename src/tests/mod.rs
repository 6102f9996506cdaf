//! Scenario tests across extraction, embedding, ranking and output.
//!
//! The real model needs a download, so these run against small in-memory
//! providers with a known geometry.


use std::cell::Cell;
use std::path::Path;

use crate::document::{split_blocks, Document, DocumentError, DocumentParser, Page, TextUnit};
use crate::semantic::{EmbeddingError, EmbeddingProvider};

/// Bag-of-words provider over a fixed vocabulary.
///
/// Texts that share no vocabulary word embed to the zero vector.
pub struct KeywordProvider {
    vocabulary: Vec<&'static str>,
    calls: Cell<usize>,
}

impl KeywordProvider {
    pub fn new(vocabulary: &[&'static str]) -> Self {
        Self {
            vocabulary: vocabulary.to_vec(),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect();

        self.vocabulary
            .iter()
            .map(|term| words.iter().filter(|w| w.as_str() == *term).count() as f32)
            .collect()
    }
}

impl EmbeddingProvider for KeywordProvider {
    fn name(&self) -> &str {
        "keyword"
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.set(self.calls.get() + 1);
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }
}

/// Provider that fails every call.
pub struct FailingProvider;

impl EmbeddingProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn dimensions(&self) -> usize {
        3
    }

    fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::EmbeddingFailed("model crashed".to_string()))
    }
}

/// Reads plain-text files: pages split on form feeds, blocks on blank lines.
pub struct PlainTextParser;

impl DocumentParser for PlainTextParser {
    fn supports(&self, path: &Path) -> bool {
        path.extension().map(|ext| ext == "txt").unwrap_or(false)
    }

    fn parse(&self, path: &Path) -> Result<Document, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Parse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

        let source_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Document {
            source_id,
            pages: text
                .split('\u{c}')
                .enumerate()
                .map(|(idx, page)| Page {
                    number: idx as u32 + 1,
                    blocks: split_blocks(page),
                })
                .collect(),
        })
    }
}

pub fn unit(source_id: &str, location: u32, text: &str) -> TextUnit {
    TextUnit {
        source_id: source_id.to_string(),
        location,
        text: text.to_string(),
    }
}

pub const INSURANCE_TEXT: &str = "insurance claims rose sharply this quarter across regions";
pub const PESTICIDE_TEXT: &str = "pesticide residue limits were revised by regulators";

pub fn scenario_vocabulary() -> KeywordProvider {
    KeywordProvider::new(&[
        "insurance",
        "claims",
        "quarter",
        "pesticide",
        "residue",
        "regulators",
    ])
}
