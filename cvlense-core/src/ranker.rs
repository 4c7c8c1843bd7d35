//! Ranker
//!
//! Scores normalized candidate text against a weighted keyword profile.
//! Pure, side-effect-free substring matching - no semantic interpretation.
//! Documents carrying the extraction-failure sentinel never compete with
//! parsed ones: they score exactly zero.

use crate::types::{Candidate, KeywordProfile, PARSE_ERROR_MARKER};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Fixed bonus weight applied per role-title occurrence.
const ROLE_BONUS_WEIGHT: f64 = 2.0;

/// Diversity bonus: distinct alphabetic tokens / DIVERSITY_DIVISOR,
/// capped at DIVERSITY_CAP. Rewards breadth of vocabulary while keeping
/// its influence bounded relative to targeted keyword hits.
const DIVERSITY_DIVISOR: f64 = 500.0;
const DIVERSITY_CAP: f64 = 5.0;

pub struct Ranker {
    keywords: HashMap<String, f64>,
    role: String,
    token_re: Regex,
}

impl Ranker {
    pub fn new(profile: &KeywordProfile) -> Self {
        let keywords = profile
            .weights
            .iter()
            .filter(|(k, _)| !k.is_empty())
            .map(|(k, w)| (k.to_lowercase(), *w))
            .collect();
        Self {
            keywords,
            role: profile.role.to_lowercase(),
            token_re: Regex::new(r"[a-zA-Z]{3,}").expect("static token pattern"),
        }
    }

    /// Compute total relevance and the per-keyword contribution breakdown.
    pub fn score(&self, text: &str) -> (f64, HashMap<String, f64>) {
        let t = text.to_lowercase();
        if t.starts_with(&PARSE_ERROR_MARKER.to_lowercase()) {
            return (0.0, HashMap::new());
        }

        let mut matched = HashMap::new();
        let mut total = 0.0;
        for (keyword, weight) in &self.keywords {
            let cnt = t.matches(keyword.as_str()).count();
            if cnt > 0 {
                let contribution = cnt as f64 * weight;
                matched.insert(keyword.clone(), contribution);
                total += contribution;
            }
        }

        if !self.role.is_empty() {
            total += ROLE_BONUS_WEIGHT * t.matches(self.role.as_str()).count() as f64;
        }

        let tokens: HashSet<&str> = self.token_re.find_iter(&t).map(|m| m.as_str()).collect();
        total += (tokens.len() as f64 / DIVERSITY_DIVISOR).min(DIVERSITY_CAP);

        (total, matched)
    }
}

/// Score every candidate against the profile, then stable-sort descending
/// by score: ties keep their insertion order. Re-ranking with a new profile
/// only mutates `score`/`matched`, never `text`, and is idempotent for a
/// fixed profile.
pub fn rank_candidates(candidates: &mut [Candidate], profile: &KeywordProfile) {
    let ranker = Ranker::new(profile);
    for candidate in candidates.iter_mut() {
        let (score, matched) = ranker.score(&candidate.text);
        candidate.score = score;
        candidate.matched = matched;
    }
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_error;

    fn profile(spec: &str, role: &str) -> KeywordProfile {
        KeywordProfile::parse(spec, role)
    }

    #[test]
    fn weighted_keyword_contributions() {
        // "Jane Doe jane.doe@example.com Python Python SQL" holds 6 distinct
        // alphabetic tokens of length >= 3, so the diversity bonus is 6/500
        let ranker = Ranker::new(&profile("python:2, sql:1", ""));
        let (score, matched) = ranker.score("Jane Doe jane.doe@example.com Python Python SQL");
        assert_eq!(matched.get("python"), Some(&4.0));
        assert_eq!(matched.get("sql"), Some(&1.0));
        assert!((score - (5.0 + 6.0 / 500.0)).abs() < 1e-9);
    }

    #[test]
    fn sentinel_text_scores_zero() {
        let ranker = Ranker::new(&profile("python:2, boom:10", "engineer"));
        let (score, matched) = ranker.score(&parse_error("boom"));
        assert_eq!(score, 0.0);
        assert!(matched.is_empty());
    }

    #[test]
    fn no_keyword_hits_leaves_matched_empty() {
        let ranker = Ranker::new(&profile("kubernetes:3", ""));
        let (score, matched) = ranker.score("experienced accountant, ledgers and audits");
        assert!(matched.is_empty());
        // only the diversity bonus remains
        assert!(score > 0.0 && score <= DIVERSITY_CAP);
    }

    #[test]
    fn role_bonus_is_not_part_of_matched() {
        let ranker = Ranker::new(&profile("", "data engineer"));
        let (score, matched) = ranker.score("Data Engineer and data engineer roles held");
        assert!(matched.is_empty());
        // 2 role occurrences x 2.0 plus diversity on 5 distinct tokens
        assert!((score - (4.0 + 5.0 / 500.0)).abs() < 1e-9);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let ranker = Ranker::new(&profile("PYTHON", ""));
        let (_, matched) = ranker.score("Seasoned PyThOn developer");
        assert_eq!(matched.get("python"), Some(&1.0));
    }

    #[test]
    fn raising_a_weight_never_lowers_the_score() {
        let text = "rust rust tokio async services";
        let (low, _) = Ranker::new(&profile("rust:1", "")).score(text);
        let (high, _) = Ranker::new(&profile("rust:3", "")).score(text);
        assert!(high >= low);
    }

    #[test]
    fn diversity_bonus_is_capped() {
        // 3000 distinct tokens would earn 6.0 uncapped
        let text: String = (0..3000)
            .map(|i| format!("tok{} ", to_alpha(i)))
            .collect();
        let (score, _) = Ranker::new(&profile("", "")).score(&text);
        assert!((score - DIVERSITY_CAP).abs() < 1e-9);
    }

    /// Digit-free unique suffixes so every token survives `[a-zA-Z]{3,}` intact.
    fn to_alpha(mut n: usize) -> String {
        let mut s = String::new();
        loop {
            s.push((b'a' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        s
    }

    #[test]
    fn ranking_sort_is_stable_for_ties() {
        let mut candidates = vec![
            Candidate::new("X".into(), None, None, "/x".into(), "python".into()),
            Candidate::new("Y".into(), None, None, "/y".into(), "python".into()),
            Candidate::new("Z".into(), None, None, "/z".into(), "python python".into()),
        ];
        rank_candidates(&mut candidates, &profile("python", ""));
        assert_eq!(candidates[0].name, "Z");
        assert_eq!(candidates[1].name, "X");
        assert_eq!(candidates[2].name, "Y");
    }

    #[test]
    fn reranking_is_idempotent() {
        let mut candidates = vec![Candidate::new(
            "X".into(),
            None,
            None,
            "/x".into(),
            "python sql".into(),
        )];
        let p = profile("python:2", "");
        rank_candidates(&mut candidates, &p);
        let first = (candidates[0].score, candidates[0].matched.clone());
        rank_candidates(&mut candidates, &p);
        assert_eq!(first.0, candidates[0].score);
        assert_eq!(first.1, candidates[0].matched);
    }
}
