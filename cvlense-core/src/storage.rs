//! Extraction cache storage
//!
//! Caches normalized extracted text keyed by a chunked content hash of the
//! source document, so re-screening a batch with a new keyword profile
//! never re-parses PDFs. Sentinel (parse-error) texts are not cached - a
//! retry after fixing the environment should re-attempt extraction.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Version constants for cache invalidation
pub mod versions {
    pub const CVLENSE_VERSION: &str = "0.1.0";
    pub const EXTRACTION_VERSION: &str = "1.0.0";
}

/// Cached extraction result with provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedExtraction {
    pub text: String,
    /// Which extraction strategy produced the text
    pub extractor: String,
    pub created_at: DateTime<Utc>,
    pub cache_version: String,
}

impl CachedExtraction {
    pub fn new(text: String, extractor: &str) -> Self {
        Self {
            text,
            extractor: extractor.to_string(),
            created_at: Utc::now(),
            cache_version: versions::CVLENSE_VERSION.to_string(),
        }
    }
}

/// Storage abstraction for cached extraction results
pub trait DocumentStorage {
    fn get_extraction(&self, doc_hash: &str) -> Result<Option<CachedExtraction>>;
    fn store_extraction(&self, doc_hash: &str, cached: &CachedExtraction) -> Result<()>;
}

/// File-based storage implementation using a local cache directory
pub struct FileStorage {
    cache_dir: String,
}

impl FileStorage {
    pub fn new(cache_dir: &str) -> Result<Self> {
        fs::create_dir_all(format!("{cache_dir}/text"))?;
        Ok(Self {
            cache_dir: cache_dir.to_string(),
        })
    }

    fn text_path(&self, hash: &str) -> String {
        format!("{}/text/{}.json", self.cache_dir, hash)
    }
}

impl DocumentStorage for FileStorage {
    fn get_extraction(&self, doc_hash: &str) -> Result<Option<CachedExtraction>> {
        let path = self.text_path(doc_hash);
        if Path::new(&path).exists() {
            let json_str = fs::read_to_string(path)?;
            let cached: CachedExtraction = serde_json::from_str(&json_str)
                .map_err(|e| anyhow!("Failed to deserialize cached extraction: {}", e))?;
            Ok(Some(cached))
        } else {
            Ok(None)
        }
    }

    fn store_extraction(&self, doc_hash: &str, cached: &CachedExtraction) -> Result<()> {
        let path = self.text_path(doc_hash);
        let json_str = serde_json::to_string_pretty(cached)
            .map_err(|e| anyhow!("Failed to serialize extraction: {}", e))?;
        fs::write(path, json_str)?;
        Ok(())
    }
}

/// No-op storage implementation that disables caching
pub struct NoOpStorage;

impl Default for NoOpStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl NoOpStorage {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStorage for NoOpStorage {
    fn get_extraction(&self, _doc_hash: &str) -> Result<Option<CachedExtraction>> {
        Ok(None)
    }

    fn store_extraction(&self, _doc_hash: &str, _cached: &CachedExtraction) -> Result<()> {
        Ok(())
    }
}

/// Calculate a fast content hash using size plus start and end chunks.
/// Good enough to distinguish documents without hashing multi-megabyte
/// files end to end.
pub fn calculate_doc_hash(doc_bytes: &[u8]) -> String {
    let chunk_size = 1024;
    let mut hasher = Sha256::new();

    hasher.update(doc_bytes.len().to_le_bytes());

    let start_end = std::cmp::min(chunk_size, doc_bytes.len());
    hasher.update(&doc_bytes[0..start_end]);

    if doc_bytes.len() > chunk_size {
        let end_start = doc_bytes.len() - chunk_size;
        hasher.update(&doc_bytes[end_start..]);
    }

    format!("{:x}", hasher.finalize())
}
