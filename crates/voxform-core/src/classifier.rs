//! Heuristic detection of unfilled form blanks.

use regex::{Regex, RegexSet};

use crate::error::FormError;

/// Placeholder tokens, stripped in this order when a node is converted.
const PLACEHOLDER_PATTERNS: [&str; 4] = [
    r"_{3,}",
    r"\.{3,}",
    r"(?i)\((?:enter|fill|input|image|logo|photo)\)",
    r"\[.*?\]",
];

/// Text that is empty or whitespace only.
const BLANK_PATTERN: &str = r"^\s*$";

/// Decides whether a node's text looks like a blank waiting to be filled.
///
/// Matches runs of three or more underscores or dots, the hints `(enter)`,
/// `(fill)`, `(input)`, `(image)`, `(logo)`, `(photo)` in any case, bracketed
/// tokens such as `[Name]`, and blank text. False positives are accepted.
#[derive(Debug, Clone)]
pub struct FieldClassifier {
    fillable: RegexSet,
    placeholders: Vec<Regex>,
}

impl FieldClassifier {
    pub fn new() -> Result<Self, FormError> {
        let fillable = RegexSet::new(PLACEHOLDER_PATTERNS.iter().copied().chain([BLANK_PATTERN]))?;
        let placeholders = PLACEHOLDER_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            fillable,
            placeholders,
        })
    }

    pub fn is_fillable(&self, text: &str) -> bool {
        self.fillable.is_match(text)
    }

    /// Remove every placeholder token and trim what is left.
    pub fn strip_placeholders(&self, text: &str) -> String {
        let stripped = self
            .placeholders
            .iter()
            .fold(text.to_string(), |acc, pattern| {
                pattern.replace_all(&acc, "").into_owned()
            });
        stripped.trim().to_string()
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
