//! Archive Expander
//!
//! Expands ZIP drops into a scratch working area and stages directly-added
//! PDFs alongside them, so the rest of the pipeline only ever sees plain
//! PDF paths. Best-effort by design: a member that cannot be relocated to
//! its canonical slot is still returned at its extracted path rather than
//! dropped, and a PDF that cannot be staged is screened in place.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding expanded archive members and staged PDFs for
/// the lifetime of one screening session.
pub struct WorkArea {
    dir: TempDir,
}

impl WorkArea {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("cvlense_")
            .tempdir()
            .context("Failed to create working area")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Extract every `.pdf` member (case-insensitive) of a ZIP archive into
    /// the working area and return the resulting paths.
    ///
    /// Members land at their base filename in the work-area root. A name
    /// collision keeps the later member at its archive-internal directory
    /// path instead of overwriting the earlier one.
    pub fn expand_zip(&self, zip_path: &Path) -> Result<Vec<PathBuf>> {
        let file = File::open(zip_path)
            .with_context(|| format!("Failed to open archive: {}", zip_path.display()))?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))
            .with_context(|| format!("Failed to read zip archive: {}", zip_path.display()))?;

        let mut out = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if !entry.name().to_lowercase().ends_with(".pdf") {
                continue;
            }
            // Reject entries escaping the extraction root (../ tricks)
            let Some(rel) = entry.enclosed_name().map(|p| p.to_path_buf()) else {
                continue;
            };

            let extracted = self.dir.path().join(&rel);
            if let Some(parent) = extracted.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut dest_file = File::create(&extracted)
                .with_context(|| format!("Failed to extract member: {}", rel.display()))?;
            std::io::copy(&mut entry, &mut dest_file)?;

            let Some(base) = rel.file_name() else {
                out.push(extracted);
                continue;
            };
            let canonical = self.dir.path().join(base);
            if canonical == extracted {
                out.push(extracted);
            } else if canonical.exists() {
                // collision: the directory structure disambiguates
                out.push(extracted);
            } else {
                match fs::rename(&extracted, &canonical) {
                    Ok(()) => out.push(canonical),
                    Err(_) => out.push(extracted),
                }
            }
        }
        Ok(out)
    }

    /// Copy a directly-added PDF into the working area, preserving its base
    /// filename. On failure the original path is returned so the document
    /// still gets screened.
    pub fn stage_pdf(&self, src: &Path) -> PathBuf {
        let Some(base) = src.file_name() else {
            return src.to_path_buf();
        };
        let dest = self.dir.path().join(base);
        match fs::copy(src, &dest) {
            Ok(_) => dest,
            Err(_) => src.to_path_buf(),
        }
    }
}
