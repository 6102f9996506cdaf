//! Document loading and textual-unit extraction.
//!
//! - `parser`: turns files on disk into pages of raw text blocks
//! - `extract`: applies the relevance filter and produces `TextUnit`s

mod extract;
mod parser;

use std::io::Write;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

pub use extract::{TextUnit, UnitExtractor, DEFAULT_MIN_WORDS};
pub use parser::{discover_documents, split_blocks, DocumentParser, PdfParser};

/// One page of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Raw text blocks in reading order
    pub blocks: Vec<String>,
}

/// A parsed document, as delivered by a `DocumentParser`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier of the source (the file name)
    pub source_id: String,
    pub pages: Vec<Page>,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("input directory {0:?} does not exist")]
    MissingInput(PathBuf),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no supported documents found in {0:?}")]
    NoDocuments(PathBuf),

    #[error("no text unit with at least {min_words} words in {documents} document(s)")]
    NoUnits { documents: usize, min_words: usize },
}

impl DocumentError {
    /// Both variants mean there is nothing to search.
    pub fn is_empty_corpus(&self) -> bool {
        matches!(self, Self::NoDocuments(_) | Self::NoUnits { .. })
    }
}

/// Output of the loading stage.
#[derive(Debug)]
pub struct LoadedCorpus {
    pub documents: usize,
    pub units: Vec<TextUnit>,
}

/// Discover, parse and extract every document under `dir`.
///
/// The number of documents found is reported on `out` before any of them is
/// parsed. An unreadable document aborts the load unless `skip_unreadable` is
/// set, in which case it is logged and contributes nothing.
pub fn load_corpus(
    dir: &Path,
    parser: &dyn DocumentParser,
    extractor: &UnitExtractor,
    skip_unreadable: bool,
    out: &mut dyn Write,
) -> Result<LoadedCorpus, DocumentError> {
    let paths = discover_documents(dir, parser)?;
    if paths.is_empty() {
        return Err(DocumentError::NoDocuments(dir.to_path_buf()));
    }

    // progress output only, a closed pipe must not abort the run
    if let Err(e) = writeln!(out, "Found {} document(s) in {}.", paths.len(), dir.display()) {
        log::debug!("could not report document count: {e}");
    }

    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut units = Vec::new();
    for path in &paths {
        progress.set_message(
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );

        match parser.parse(path) {
            Ok(document) => {
                let extracted = extractor.extract(&document);
                log::debug!(
                    "source={} pages={} units={}",
                    document.source_id,
                    document.pages.len(),
                    extracted.len()
                );
                units.extend(extracted);
            }
            Err(e) if skip_unreadable => {
                log::warn!("skipping unreadable document: {e}");
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if units.is_empty() {
        return Err(DocumentError::NoUnits {
            documents: paths.len(),
            min_words: extractor.min_words(),
        });
    }

    Ok(LoadedCorpus {
        documents: paths.len(),
        units,
    })
}
