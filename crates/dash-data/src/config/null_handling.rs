//! Null value handling for data loading

use serde::{Serialize, Deserialize};

/// Cell contents read as missing by default
pub const DEFAULT_NULL_TOKENS: &[&str] = &[
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

/// Null value configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullConfig {
    /// Patterns to treat as null
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_NULL_TOKENS.iter().map(|s| s.to_string()).collect(),
            trim_whitespace: false,
            case_sensitive: true,
        }
    }
}

impl NullConfig {
    /// Check if a value should be treated as null
    pub fn is_null(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tokens_are_exact() {
        let config = NullConfig::default();
        assert!(config.is_null(""));
        assert!(config.is_null("NaN"));
        assert!(config.is_null("NA"));
        assert!(config.is_null("<NA>"));
        assert!(!config.is_null("Nan"));
        assert!(!config.is_null(" NA"));
        assert!(!config.is_null("missing"));
    }

    #[test]
    fn test_relaxed_matching() {
        let config = NullConfig {
            patterns: vec!["missing".to_string()],
            trim_whitespace: true,
            case_sensitive: false,
        };
        assert!(config.is_null("  MISSING "));
        assert!(!config.is_null("present"));
    }
}
