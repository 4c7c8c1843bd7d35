use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

/// Sentinel prefix carried inside `Candidate::text` when extraction failed.
/// Callers must check for it before treating `text` as document content;
/// the ranker short-circuits sentinel texts to a zero score.
pub const PARSE_ERROR_MARKER: &str = "[PARSE_ERROR]";

/// Build the sentinel text for a failed extraction.
pub fn parse_error(err: impl Display) -> String {
    format!("{PARSE_ERROR_MARKER} {err}")
}

/// One screened document plus its derived identity and score.
///
/// Created once per source document; `path` and `text` are fixed after
/// creation, `score`/`matched` are overwritten on each ranking pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Best-effort human name; never empty (filename fallback or placeholder)
    pub name: String,
    /// First email-pattern match in the text, if any
    pub email: Option<String>,
    /// First phone-pattern match in the text, if any
    pub phone: Option<String>,
    /// Filesystem identity of the source document - de-duplication key
    pub path: String,
    /// Normalized extracted content, or a `[PARSE_ERROR]`-prefixed sentinel
    pub text: String,
    /// Total relevance, set by the ranker
    pub score: f64,
    /// Per-keyword weighted contribution (count x weight) from the last pass
    pub matched: HashMap<String, f64>,
}

impl Candidate {
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        path: String,
        text: String,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            path,
            text,
            score: 0.0,
            matched: HashMap::new(),
        }
    }

    /// Whether `text` holds the extraction-failure sentinel instead of content.
    pub fn is_parse_error(&self) -> bool {
        self.text.starts_with(PARSE_ERROR_MARKER)
    }

    /// Base filename of the source document, for exporters and display.
    pub fn file_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.clone())
    }
}

/// Weighted set of lowercased keywords plus an optional role string.
/// Constructed fresh per ranking pass from user input, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordProfile {
    pub weights: HashMap<String, f64>,
    pub role: String,
}

impl KeywordProfile {
    /// Parse a comma-separated `keyword` / `keyword:weight` spec.
    ///
    /// Keywords are case-folded on ingestion. A missing, malformed, or
    /// negative weight defaults to 1.0 rather than surfacing an error.
    pub fn parse(spec: &str, role: &str) -> Self {
        let mut weights = HashMap::new();
        for token in spec.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.split_once(':') {
                Some((key, raw_weight)) => {
                    let key = key.trim().to_lowercase();
                    if key.is_empty() {
                        continue;
                    }
                    let weight = raw_weight
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|w| *w >= 0.0)
                        .unwrap_or(1.0);
                    weights.insert(key, weight);
                }
                None => {
                    weights.insert(token.to_lowercase(), 1.0);
                }
            }
        }
        Self {
            weights,
            role: role.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty() && self.role.is_empty()
    }
}
