//! Textual-unit extraction with a word-count relevance filter.

use serde::{Deserialize, Serialize};

use super::Document;

/// Blocks with fewer whitespace-separated tokens than this are dropped
pub const DEFAULT_MIN_WORDS: usize = 5;

/// One retrievable passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    #[serde(rename = "pdf")]
    pub source_id: String,
    /// 1-based page number
    #[serde(rename = "page")]
    pub location: u32,
    /// Trimmed block text
    pub text: String,
}

/// Turns parsed documents into `TextUnit`s.
///
/// Discards headers, page numbers, bullet fragments and other blocks too
/// short to carry meaning.
#[derive(Debug, Clone)]
pub struct UnitExtractor {
    min_words: usize,
}

impl Default for UnitExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_WORDS)
    }
}

impl UnitExtractor {
    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }

    pub fn min_words(&self) -> usize {
        self.min_words
    }

    pub fn is_relevant(&self, text: &str) -> bool {
        text.split_whitespace().count() >= self.min_words
    }

    /// Extract units in page order, then block order.
    pub fn extract(&self, document: &Document) -> Vec<TextUnit> {
        document
            .pages
            .iter()
            .flat_map(|page| {
                page.blocks.iter().filter_map(move |block| {
                    let text = block.trim();
                    self.is_relevant(text).then(|| TextUnit {
                        source_id: document.source_id.clone(),
                        location: page.number,
                        text: text.to_string(),
                    })
                })
            })
            .collect()
    }

    /// Extract every document, keeping the input document order.
    pub fn extract_all(&self, documents: &[Document]) -> Vec<TextUnit> {
        documents.iter().flat_map(|doc| self.extract(doc)).collect()
    }
}
