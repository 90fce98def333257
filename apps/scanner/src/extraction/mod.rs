//! Document Text Extractor: turns an uploaded resume or JD file into plain text.
//!
//! Dispatch is by file extension onto [`DocumentKind`], one handler per kind.
//! Every failure is absorbed at the public boundary: callers always get a
//! `String`, empty when the document could not be read.

mod docx;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, error, warn};

/// Internal failure while reading a document. Never crosses the public API.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("text is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Input formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Detects the kind from a file name or path, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())?;

        match extension.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    /// Extensions that are stripped when a file name is turned into a label.
    pub const EXTENSIONS: &'static [&'static str] = &["txt", "pdf", "docx"];

    pub fn extract(self, bytes: &[u8]) -> Result<String, ExtractionError> {
        match self {
            DocumentKind::Pdf => extract_pdf(bytes),
            DocumentKind::Docx => docx::extract_paragraphs(bytes),
            DocumentKind::PlainText => Ok(String::from_utf8(bytes.to_vec())?.trim().to_string()),
        }
    }
}

/// Reads the file at `path` and returns its text, or an empty string on any failure.
pub fn extract_text(path: &Path) -> String {
    let name = path.to_string_lossy();
    match try_extract_path(path) {
        Ok(text) => {
            debug!("Extracted {} chars from {name}", text.len());
            text
        }
        Err(ExtractionError::Unsupported(_)) => {
            warn!("Unsupported file type: {name}");
            String::new()
        }
        Err(e) => {
            error!("Failed to extract text from {name}: {e}");
            String::new()
        }
    }
}

/// Extracts text from uploaded bytes. `file_name` is used only to pick the format.
pub fn extract_text_from_bytes(file_name: &str, bytes: &[u8]) -> String {
    let result = DocumentKind::from_name(file_name)
        .ok_or_else(|| ExtractionError::Unsupported(file_name.to_string()))
        .and_then(|kind| kind.extract(bytes));

    match result {
        Ok(text) => text,
        Err(ExtractionError::Unsupported(_)) => {
            warn!("Unsupported file type: {file_name}");
            String::new()
        }
        Err(e) => {
            error!("Failed to extract text from {file_name}: {e}");
            String::new()
        }
    }
}

fn try_extract_path(path: &Path) -> Result<String, ExtractionError> {
    let name = path.to_string_lossy();
    let kind = DocumentKind::from_name(&name)
        .ok_or_else(|| ExtractionError::Unsupported(name.to_string()))?;
    let bytes = std::fs::read(path)?;
    kind.extract(&bytes)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractionError::Pdf("parser panicked on malformed document".to_string()))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    Ok(join_pages(&pages))
}

/// Joins per-page text with newlines. Pages with nothing but whitespace are dropped.
fn join_pages(pages: &[String]) -> String {
    let text = pages
        .iter()
        .filter(|page| !page.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_kind_detection_is_case_insensitive() {
        assert_eq!(DocumentKind::from_name("resume.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_name("cv.Docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_name("jd.txt"), Some(DocumentKind::PlainText));
        assert_eq!(DocumentKind::from_name("notes.md"), None);
        assert_eq!(DocumentKind::from_name("no_extension"), None);
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        fs::write(&path, "\n\n  Jane Smith\nPython developer  \n").unwrap();

        assert_eq!(extract_text(&path), "Jane Smith\nPython developer");
    }

    #[test]
    fn test_missing_file_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_text(&dir.path().join("gone.txt")), "");
    }

    #[test]
    fn test_unsupported_extension_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.rtf");
        fs::write(&path, "{\\rtf1 hello}").unwrap();

        assert_eq!(extract_text(&path), "");
    }

    #[test]
    fn test_invalid_utf8_yields_empty_text() {
        assert_eq!(extract_text_from_bytes("resume.txt", &[0xff, 0xfe, 0x41]), "");
    }

    #[test]
    fn test_corrupt_pdf_yields_empty_text() {
        assert_eq!(extract_text_from_bytes("resume.pdf", b"%PDF-1.4 not really"), "");
    }

    /// Builds a PDF with one Courier text line per page; an empty string makes a blank page.
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pdf_pages_joined_with_newline() {
        let bytes = build_pdf(&["Experience", "", "Education"]);
        let text = extract_text_from_bytes("resume.pdf", &bytes);

        assert_eq!(text, text.trim());
        let first = text.find("Experience").expect("first page text");
        let second = text.find("Education").expect("last page text");
        assert!(first < second);
        assert!(text[first..second].contains('\n'));
    }

    #[test]
    fn test_join_pages_drops_blank_pages() {
        let pages = vec![
            "  Jane Smith".to_string(),
            " \n\n ".to_string(),
            String::new(),
            "Python developer\n".to_string(),
        ];
        assert_eq!(join_pages(&pages), "Jane Smith\nPython developer");
    }

    #[test]
    fn test_corrupt_docx_yields_empty_text() {
        assert_eq!(extract_text_from_bytes("resume.docx", b"PK\x03\x04 broken"), "");
    }

    #[test]
    fn test_bytes_use_name_only_for_dispatch() {
        let text = extract_text_from_bytes("upload.TXT", b"  Rust and SQL  ");
        assert_eq!(text, "Rust and SQL");
    }
}
