use crate::types::KeywordProfile;
use anyhow::Result;
use serde::{Deserialize, Serialize};

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_cache_dir() -> String {
    "cache".to_string()
}

/// Screening run configuration, loadable from YAML.
///
/// Holds the reusable parts of a screening session - the keyword spec, the
/// role title, and cache behavior - so a recruiter can keep one profile per
/// open position instead of retyping CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningConfig {
    /// Keyword spec: `keyword` or `keyword:weight` tokens, comma separated
    #[serde(default)]
    pub keywords: String,
    /// Role title matched as a fixed-weight bonus
    #[serde(default)]
    pub role: String,
    /// Candidates below this score are dropped from output
    #[serde(default)]
    pub min_score: f64,
    /// Directory for the extraction cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    /// Cache extracted text keyed by document content hash
    #[serde(default = "default_true")]
    pub use_extraction_cache: bool,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            role: String::new(),
            min_score: 0.0,
            cache_dir: default_cache_dir(),
            use_extraction_cache: true,
        }
    }
}

impl ScreeningConfig {
    /// Load config from file path (functional approach)
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ScreeningConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|_| {
                eprintln!("⚠️  Failed to load config from {}, using defaults", p);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Build the keyword profile for one ranking pass.
    pub fn profile(&self) -> KeywordProfile {
        KeywordProfile::parse(&self.keywords, &self.role)
    }
}
