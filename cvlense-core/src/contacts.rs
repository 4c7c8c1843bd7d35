//! Contact Extractor
//!
//! Derives a best-guess name, email, and phone number from extracted resume
//! text. Pure function of its inputs: the same text and fallback filename
//! always produce the same contacts. Name resolution is heuristic and ends
//! in a defined placeholder, never an error.

use regex::Regex;

/// Placeholder name when every heuristic comes up empty.
pub const UNKNOWN_NAME: &str = "(Unknown)";

/// Best-guess identity fields pulled from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contacts {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub struct ContactExtractor {
    email_re: Regex,
    phone_re: Regex,
    name_line_re: Regex,
    non_name_re: Regex,
    email_context_re: Regex,
    multi_space_re: Regex,
    separator_re: Regex,
    whitespace_re: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self {
            email_re: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
                .expect("static email pattern"),
            phone_re: Regex::new(r"(?:(?:\+\d{1,3}[- ]?)?\d{3}[- ]?\d{3}[- ]?\d{4})")
                .expect("static phone pattern"),
            name_line_re: Regex::new(r"^[A-Z][A-Za-z'’-]+(?: [A-Z][A-Za-z'’-]+){0,3}$")
                .expect("static name line pattern"),
            non_name_re: Regex::new(r"[^A-Za-z '’-]").expect("static non-name pattern"),
            email_context_re: Regex::new(r"(?i)(.{0,60}?)(?:\s+Email\b|@)")
                .expect("static email context pattern"),
            multi_space_re: Regex::new(r"\s{2,}").expect("static multi-space pattern"),
            separator_re: Regex::new(r"[_\-]+").expect("static separator pattern"),
            whitespace_re: Regex::new(r"\s+").expect("static whitespace pattern"),
        }
    }

    /// Extract contacts from normalized text, falling back to the source
    /// filename for the name.
    pub fn extract(&self, text: &str, fallback_filename: &str) -> Contacts {
        let email = self.email_re.find(text).map(|m| m.as_str().to_string());
        let phone = self.phone_re.find(text).map(|m| m.as_str().to_string());

        let name = self
            .name_from_head(text)
            .or_else(|| self.name_from_email_context(text))
            .unwrap_or_else(|| self.name_from_filename(fallback_filename));

        Contacts { name, email, phone }
    }

    /// Heuristic (a): look for a capitalized word sequence in the first ~50
    /// tokens. Stripping non-name characters turns collapsed line breaks and
    /// punctuation into double-space boundaries, which approximate the
    /// original line structure.
    fn name_from_head(&self, text: &str) -> Option<String> {
        let collapsed = self.whitespace_re.replace_all(text.trim(), " ");
        let head: Vec<&str> = collapsed.split(' ').take(50).collect();
        let head_joined = head.join(" ");
        let stripped = self.non_name_re.replace_all(&head_joined, " ");

        for segment in stripped.split("  ") {
            let segment = segment.trim();
            if segment.is_empty()
                || segment.contains('@')
                || segment.chars().any(|c| c.is_ascii_digit())
            {
                continue;
            }
            if segment.chars().count() <= 60 && self.name_line_re.is_match(segment) {
                return Some(segment.to_string());
            }
        }
        None
    }

    /// Heuristic (b): a short span immediately preceding "Email" or an "@"
    /// often holds the name on resumes with decorated header lines.
    fn name_from_email_context(&self, text: &str) -> Option<String> {
        let caps = self.email_context_re.captures(text)?;
        let guess = self.non_name_re.replace_all(&caps[1], " ");
        let guess = self
            .multi_space_re
            .replace_all(guess.trim(), " ")
            .into_owned();
        let len = guess.chars().count();
        if (2..=60).contains(&len) {
            Some(guess)
        } else {
            None
        }
    }

    /// Heuristic (c): derive from the filename stem; guaranteed terminal
    /// case is the placeholder.
    fn name_from_filename(&self, fallback_filename: &str) -> String {
        let stem = std::path::Path::new(fallback_filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let spaced = self.separator_re.replace_all(&stem, " ");
        let cleaned = self.non_name_re.replace_all(&spaced, " ");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            UNKNOWN_NAME.to_string()
        } else {
            cleaned.to_string()
        }
    }
}
