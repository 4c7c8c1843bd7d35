use crate::archive::WorkArea;
use crate::contacts::ContactExtractor;
use crate::extract::TextExtractor;
use crate::storage::{calculate_doc_hash, CachedExtraction, DocumentStorage, FileStorage, NoOpStorage};
use crate::types::{parse_error, Candidate};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Resume screening pipeline: archive expansion, text extraction, and
/// contact parsing, one document at a time. Ranking is a separate pass
/// over the accumulated candidate list (see `ranker::rank_candidates`).
///
/// Single-threaded and synchronous; no shared mutable state crosses
/// documents, so a bad document can only ever spoil its own Candidate.
pub struct ResumeProcessor {
    extractor: TextExtractor,
    contacts: ContactExtractor,
    storage: Box<dyn DocumentStorage + Send + Sync>,
    work: WorkArea,
}

impl ResumeProcessor {
    /// Create ResumeProcessor with full dependency injection
    pub fn new_with_dependencies(
        extractor: TextExtractor,
        storage: Box<dyn DocumentStorage + Send + Sync>,
    ) -> Result<Self> {
        Ok(Self {
            extractor,
            contacts: ContactExtractor::new(),
            storage,
            work: WorkArea::new()?,
        })
    }

    /// Convenience constructor: compiled-in extraction backend, file cache
    pub fn new_with_cache(cache_dir: &str) -> Result<Self> {
        Self::new_with_dependencies(
            TextExtractor::with_default_backend(),
            Box::new(FileStorage::new(cache_dir)?),
        )
    }

    /// Convenience constructor: compiled-in extraction backend, no caching
    pub fn new_uncached() -> Result<Self> {
        Self::new_with_dependencies(
            TextExtractor::with_default_backend(),
            Box::new(NoOpStorage::new()),
        )
    }

    pub fn work_area(&self) -> &WorkArea {
        &self.work
    }

    /// Expand and stage the given inputs (PDFs and ZIPs), then parse every
    /// document not already present in `candidates`. Appends new Candidates
    /// in input order and returns how many were added.
    pub fn ingest(&self, inputs: &[PathBuf], candidates: &mut Vec<Candidate>) -> Result<usize> {
        let mut staged: Vec<PathBuf> = Vec::new();
        for input in inputs {
            let lower = input.to_string_lossy().to_lowercase();
            if lower.ends_with(".zip") {
                match self.work.expand_zip(input) {
                    Ok(members) => {
                        println!("📦 Expanded {}: {} PDF(s)", input.display(), members.len());
                        staged.extend(members);
                    }
                    Err(e) => println!("⚠️  Skipping archive {}: {e}", input.display()),
                }
            } else {
                staged.push(self.work.stage_pdf(input));
            }
        }

        let mut have: std::collections::HashSet<String> =
            candidates.iter().map(|c| c.path.clone()).collect();

        let mut added = 0;
        for path in staged {
            let key = path.to_string_lossy().into_owned();
            if !have.insert(key) {
                continue;
            }
            candidates.push(self.process_file(&path));
            added += 1;
        }
        Ok(added)
    }

    /// Process one document into a Candidate. Never fails: extraction
    /// errors surface as a sentinel-text Candidate that will score zero,
    /// so the caller can flag or filter it rather than silently lose it.
    pub fn process_file(&self, path: &Path) -> Candidate {
        let text = self.extract_cached(path);
        let fallback = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let contacts = self.contacts.extract(&text, &fallback);

        Candidate::new(
            contacts.name,
            contacts.email,
            contacts.phone,
            path.to_string_lossy().into_owned(),
            text,
        )
    }

    /// Extract text with cache lookup by content hash. Sentinel texts are
    /// never cached; an unreadable file skips the cache entirely and the
    /// extractor reports the I/O failure as a sentinel.
    fn extract_cached(&self, path: &Path) -> String {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return parse_error(format!("failed to read document: {e}")),
        };
        let doc_hash = calculate_doc_hash(&bytes);

        if let Ok(Some(cached)) = self.storage.get_extraction(&doc_hash) {
            println!("🎯 Cache hit: {}", path.display());
            return cached.text;
        }

        let text = self.extractor.extract_bytes(&bytes);
        if !text.starts_with(crate::types::PARSE_ERROR_MARKER) {
            let cached = CachedExtraction::new(text.clone(), self.extractor.backend_name());
            if let Err(e) = self.storage.store_extraction(&doc_hash, &cached) {
                println!("⚠️  Failed to cache extraction for {}: {e}", path.display());
            }
        }
        text
    }
}
