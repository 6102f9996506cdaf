//! Result serialization and console rendering.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::semantic::RankedResult;
use crate::storage;

/// Characters of unit text shown per result on the console
pub const DEFAULT_PREVIEW_CHARS: usize = 300;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write results to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pretty JSON with 4-space indentation. Non-ASCII text is written as is.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write `results` to `path`, creating the parent directory if needed.
pub fn write_results(path: &Path, results: &[RankedResult]) -> Result<(), OutputError> {
    let json = to_json(results)?;
    storage::write_atomic(path, &json).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {} results to {:?}", results.len(), path);
    Ok(())
}

/// Human-readable listing of `results` with truncated text.
pub fn render_console(results: &[RankedResult], preview_chars: usize) -> String {
    let mut out = String::new();
    for r in results {
        let preview: String = r.text.chars().take(preview_chars).collect();
        out.push_str(&format!(
            "\n{} | Page {} | Score: {}\n-> {}...\n",
            r.pdf, r.page, r.score, preview
        ));
    }
    out
}
