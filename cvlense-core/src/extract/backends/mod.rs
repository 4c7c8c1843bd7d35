//! PDF backend trait
//!
//! Defines the interface a library-backed PDF text extractor must implement.
//! The extractor treats backend availability as an explicit capability: a
//! `TextExtractor` built without a backend degrades to the byte scavenger,
//! which makes all three extraction branches testable without touching the
//! build environment.

use anyhow::Result;

/// Backend trait for library-backed PDF text extraction
pub trait PdfBackend: Send + Sync {
    /// Extract plain text from raw PDF bytes
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String>;

    /// Backend identifier for logging/debugging
    fn name(&self) -> &str;
}

#[cfg(feature = "pdf-backend")]
pub mod pdf_extract_backend;

#[cfg(feature = "pdf-backend")]
pub use pdf_extract_backend::PdfExtractBackend;
