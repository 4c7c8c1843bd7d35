// CV Lense Core Library
//
// Offline resume screening: extract text from candidate documents, derive
// contact fields, and rank against weighted keyword profiles.

pub mod types;
pub mod extract;
pub mod contacts;
pub mod ranker;
pub mod archive;
pub mod processor;
pub mod config;
pub mod storage;

// Re-export main types and functions for easy use
pub use types::*;
pub use contacts::{ContactExtractor, Contacts, UNKNOWN_NAME};
pub use extract::{PdfBackend, TextExtractor};
pub use processor::ResumeProcessor;
pub use ranker::{rank_candidates, Ranker};
pub use config::ScreeningConfig;

// Re-export backends for direct use
#[cfg(feature = "pdf-backend")]
pub use extract::PdfExtractBackend;
