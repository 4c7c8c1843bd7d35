//! Export formats for ranked candidate lists.
//!
//! Exporters are read-only consumers of the Candidate list: the core
//! produces ranked data, this module only formats it. Scores are rounded
//! to two decimals on the way out; `matched` keys survive a JSON round
//! trip unchanged.

use anyhow::{Context, Result};
use cvlense_core::types::Candidate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;

/// Flat export record - everything a hiring pipeline downstream needs,
/// minus the full document text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub score: f64,
    pub matched: HashMap<String, f64>,
    pub file: String,
}

impl CandidateRecord {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            score: round2(candidate.score),
            matched: candidate.matched.clone(),
            file: candidate.file_name(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render `matched` as `keyword:contribution` pairs, highest first.
fn matched_summary(matched: &HashMap<String, f64>) -> String {
    let mut pairs: Vec<(&String, &f64)> = matched.iter().collect();
    pairs.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
    pairs
        .iter()
        .map(|(k, v)| format!("{k}:{}", **v as i64))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn to_json(candidates: &[Candidate], path: &str) -> Result<()> {
    let records: Vec<CandidateRecord> = candidates
        .iter()
        .map(CandidateRecord::from_candidate)
        .collect();
    let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;
    serde_json::to_writer_pretty(file, &records)
        .with_context(|| format!("Failed to write JSON export to {path}"))?;
    Ok(())
}

pub fn to_csv(candidates: &[Candidate], path: &str) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to create {path}"))?;
    writer.write_record(["Name", "Email", "Phone", "Score", "Matched", "File"])?;
    for candidate in candidates {
        let record = CandidateRecord::from_candidate(candidate);
        writer.write_record([
            record.name.as_str(),
            record.email.as_deref().unwrap_or(""),
            record.phone.as_deref().unwrap_or(""),
            &record.score.to_string(),
            &matched_summary(&record.matched),
            record.file.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
