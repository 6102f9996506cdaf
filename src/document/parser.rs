//! Upstream document parsing.
//!
//! The pipeline only needs pages of raw text blocks; the actual decoding of
//! the binary format is delegated to `pdf-extract`.

use std::path::{Path, PathBuf};

use super::{Document, DocumentError, Page};

/// Turns a file into a `Document`.
pub trait DocumentParser {
    /// Whether the file at `path` is something this parser understands.
    fn supports(&self, path: &Path) -> bool;

    fn parse(&self, path: &Path) -> Result<Document, DocumentError>;
}

/// PDF parser backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfParser;

impl PdfParser {
    pub fn new() -> Self {
        Self
    }

    /// Build a document from raw PDF bytes.
    pub fn parse_bytes(&self, source_id: &str, bytes: &[u8]) -> Result<Document, String> {
        // pdf-extract panics on some malformed files instead of returning an error.
        // The default hook still prints the panic message to stderr.
        let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
            .map_err(|_| "pdf decoder panicked".to_string())?
            .map_err(|e| e.to_string())?;

        let pages = pages
            .iter()
            .enumerate()
            .map(|(idx, text)| Page {
                number: idx as u32 + 1,
                blocks: split_blocks(text),
            })
            .collect();

        Ok(Document {
            source_id: source_id.to_string(),
            pages,
        })
    }
}

impl DocumentParser for PdfParser {
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false)
    }

    fn parse(&self, path: &Path) -> Result<Document, DocumentError> {
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let source_id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        self.parse_bytes(&source_id, &bytes)
            .map_err(|message| DocumentError::Parse {
                path: path.to_path_buf(),
                message,
            })
    }
}

/// Split page text into blocks separated by blank lines.
///
/// Lines inside a block keep their line breaks; whitespace-only lines count
/// as blank.
pub fn split_blocks(page_text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in page_text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

/// List the files in `dir` that `parser` supports, sorted by file name.
///
/// Not recursive.
pub fn discover_documents(
    dir: &Path,
    parser: &dyn DocumentParser,
) -> Result<Vec<PathBuf>, DocumentError> {
    if !dir.is_dir() {
        return Err(DocumentError::MissingInput(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|source| DocumentError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && parser.supports(path))
        .collect();

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_blocks_on_blank_lines() {
        let text = "Title\n\nFirst paragraph line one\nline two\n   \nSecond paragraph\n";
        let blocks = split_blocks(text);
        assert_eq!(
            blocks,
            vec![
                "Title".to_string(),
                "First paragraph line one\nline two".to_string(),
                "Second paragraph".to_string(),
            ]
        );
    }

    #[test]
    fn test_split_blocks_empty_page() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("\n\n  \n").is_empty());
    }

    #[test]
    fn test_supports_pdf_case_insensitive() {
        let parser = PdfParser::new();
        assert!(parser.supports(Path::new("report.pdf")));
        assert!(parser.supports(Path::new("REPORT.PDF")));
        assert!(!parser.supports(Path::new("notes.txt")));
        assert!(!parser.supports(Path::new("pdf")));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "c.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let paths = discover_documents(dir.path(), &PdfParser::new()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = discover_documents(&missing, &PdfParser::new());
        assert!(matches!(result, Err(DocumentError::MissingInput(_))));
    }

    /// Assemble a PDF with one Helvetica text line per entry of each page,
    /// with a correct cross-reference table.
    fn minimal_pdf(pages: &[&[&str]]) -> Vec<u8> {
        let font_id = 3 + 2 * pages.len();
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        ];
        for (i, lines) in pages.iter().enumerate() {
            let mut content = String::from("BT /F1 12 Tf 72 720 Td");
            for (n, line) in lines.iter().enumerate() {
                if n > 0 {
                    content.push_str(" 0 -48 Td");
                }
                content.push_str(&format!(" ({line}) Tj"));
            }
            content.push_str(" ET");

            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
                4 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ));
        }
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_at = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    #[test]
    fn test_parse_valid_pdf_pages_in_order() {
        let bytes = minimal_pdf(&[
            &["Alpha insurance claims rose", "Bravo premiums fell sharply"],
            &["Charlie pesticide residue limits"],
        ]);

        let document = PdfParser::new().parse_bytes("report.pdf", &bytes).unwrap();

        assert_eq!(document.source_id, "report.pdf");
        let numbers: Vec<u32> = document.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2]);

        let first = document.pages[0].blocks.join("\n");
        let alpha = first.find("Alpha").expect("first line on page 1");
        let bravo = first.find("Bravo").expect("second line on page 1");
        assert!(alpha < bravo);
        assert!(!first.contains("Charlie"));
        assert!(document.pages[1].blocks.join("\n").contains("Charlie"));
        assert!(document.pages.iter().flat_map(|p| &p.blocks).all(|b| !b.trim().is_empty()));
    }

    #[test]
    fn test_parse_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();

        let result = PdfParser::new().parse(&path);
        assert!(matches!(result, Err(DocumentError::Parse { .. })));
    }
}
