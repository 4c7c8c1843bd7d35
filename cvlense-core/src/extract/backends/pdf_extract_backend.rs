//! pdf-extract backend
//!
//! Pure-Rust PDF text extraction via the `pdf-extract` crate. Produces the
//! cleanest text of the available strategies; the extractor collapses its
//! whitespace downstream.

use super::PdfBackend;
use anyhow::{Context, Result};

pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend for PdfExtractBackend {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(pdf_bytes)
            .context("pdf-extract failed to extract text")
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}
