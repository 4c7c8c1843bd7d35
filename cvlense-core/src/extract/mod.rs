//! Text Extractor
//!
//! Converts a PDF (or arbitrary binary/text file) into a normalized
//! plain-text string. Strategies in priority order:
//!
//! 1. Library backend (when injected) - cleanest result
//! 2. Non-PDF bytes - permissive text decode
//! 3. PDF bytes without a backend - byte scavenger fallback
//!
//! The extractor never fails: any internal error is folded into a
//! `[PARSE_ERROR]`-prefixed sentinel string so one bad document can never
//! abort a batch.

pub mod backends;
pub mod scavenge;

use crate::types::parse_error;
use anyhow::Result;
use regex::Regex;
use std::path::Path;
use thiserror::Error;

pub use backends::PdfBackend;

#[cfg(feature = "pdf-backend")]
pub use backends::PdfExtractBackend;

/// Canonical PDF magic header.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Extraction failure taxonomy. Never escapes the extractor - each variant
/// is rendered into the sentinel text.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("{backend} backend failed: {source}")]
    Backend {
        backend: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Text extractor with an explicitly injected PDF backend capability.
pub struct TextExtractor {
    backend: Option<Box<dyn PdfBackend>>,
    whitespace_re: Regex,
    cid_re: Regex,
}

impl TextExtractor {
    /// Create an extractor with an explicit backend capability.
    /// `None` degrades PDF input to the byte scavenger.
    pub fn new(backend: Option<Box<dyn PdfBackend>>) -> Self {
        Self {
            backend,
            whitespace_re: Regex::new(r"\s+").expect("static whitespace pattern"),
            cid_re: Regex::new(r"\(cid:\d+\)").expect("static cid pattern"),
        }
    }

    /// Create an extractor with the compiled-in backend, if any.
    #[cfg(feature = "pdf-backend")]
    pub fn with_default_backend() -> Self {
        Self::new(Some(Box::new(PdfExtractBackend::new())))
    }

    /// Without the pdf-backend feature there is no library backend; the
    /// scavenger handles PDF input.
    #[cfg(not(feature = "pdf-backend"))]
    pub fn with_default_backend() -> Self {
        Self::new(None)
    }

    /// Backend identifier for logging, or "scavenger" when none is present.
    pub fn backend_name(&self) -> &str {
        self.backend.as_ref().map_or("scavenger", |b| b.name())
    }

    /// Extract normalized text from a file. Never fails - I/O and backend
    /// errors come back as the sentinel string.
    pub fn extract(&self, path: &Path) -> String {
        match std::fs::read(path) {
            Ok(bytes) => self.extract_bytes(&bytes),
            Err(e) => parse_error(ExtractError::Io(e)),
        }
    }

    /// Extract normalized text from an in-memory byte stream.
    pub fn extract_bytes(&self, data: &[u8]) -> String {
        match self.try_extract(data) {
            Ok(text) => text,
            Err(e) => parse_error(e),
        }
    }

    fn try_extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        if let Some(backend) = &self.backend {
            let text = backend
                .extract_text(data)
                .map_err(|source| ExtractError::Backend {
                    backend: backend.name().to_string(),
                    source,
                })?;
            return Ok(self.normalize(&text));
        }

        if !data.starts_with(PDF_MAGIC) {
            // Not a PDF at all - treat as text, dropping undecodable bytes
            let text = String::from_utf8_lossy(data).replace('\u{FFFD}', "");
            return Ok(self.normalize(&text));
        }

        // PDF without a capable backend: scavenge printable runs and strip
        // residual glyph-id artifacts
        let scavenged = scavenge::scavenge(data);
        let cleaned = self.cid_re.replace_all(&scavenged, " ");
        Ok(self.normalize(&cleaned))
    }

    /// Collapse all whitespace runs to single spaces and trim.
    fn normalize(&self, text: &str) -> String {
        self.whitespace_re.replace_all(text, " ").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use crate::types::PARSE_ERROR_MARKER;

    struct FixedBackend(&'static str);

    impl PdfBackend for FixedBackend {
        fn extract_text(&self, _pdf_bytes: &[u8]) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingBackend;

    impl PdfBackend for FailingBackend {
        fn extract_text(&self, _pdf_bytes: &[u8]) -> Result<String> {
            Err(anyhow!("corrupt xref table"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn backend_output_is_normalized() {
        let extractor = TextExtractor::new(Some(Box::new(FixedBackend(
            "Jane\tDoe\n\n  Senior   Engineer ",
        ))));
        assert_eq!(
            extractor.extract_bytes(b"%PDF-1.4 irrelevant"),
            "Jane Doe Senior Engineer"
        );
    }

    #[test]
    fn backend_failure_becomes_sentinel() {
        let extractor = TextExtractor::new(Some(Box::new(FailingBackend)));
        let text = extractor.extract_bytes(b"%PDF-1.4");
        assert!(text.starts_with(PARSE_ERROR_MARKER));
        assert!(text.contains("corrupt xref table"));
    }

    #[test]
    fn non_pdf_bytes_are_decoded_as_text() {
        let extractor = TextExtractor::new(None);
        let text = extractor.extract_bytes(b"plain\ttext resume\ncontent");
        assert_eq!(text, "plain text resume content");
    }

    #[test]
    fn pdf_without_backend_is_scavenged() {
        let extractor = TextExtractor::new(None);
        let mut data = b"%PDF-1.4\x00\x01".to_vec();
        data.extend_from_slice(b"Jane Doe\x00\x02jane@example.com\x03\x04");
        let text = extractor.extract_bytes(&data);
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("jane@example.com"));
    }

    #[test]
    fn cid_artifacts_are_stripped() {
        let extractor = TextExtractor::new(None);
        let data = b"%PDF-1.4\x00(cid:102)Rust(cid:7) Developer\x00".to_vec();
        let text = extractor.extract_bytes(&data);
        assert!(text.contains("Rust Developer"));
        assert!(!text.contains("(cid:"));
    }

    #[test]
    fn missing_file_becomes_sentinel() {
        let extractor = TextExtractor::new(None);
        let text = extractor.extract(Path::new("/definitely/not/here.pdf"));
        assert!(text.starts_with(PARSE_ERROR_MARKER));
    }
}
