use std::sync::OnceLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn delimiter_runs() -> &'static Regex {
    static DELIMITERS: OnceLock<Regex> = OnceLock::new();
    DELIMITERS.get_or_init(|| Regex::new(r"[,\s]+").expect("delimiter pattern is valid"))
}

/// What a piece of free text contributed to the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextIntake {
    /// Tokens committed to the list, in input order.
    pub committed: Vec<String>,
    /// Trailing text not yet terminated by a delimiter; the host keeps it in
    /// the input field.
    pub pending: String,
}

/// Ordered, case-sensitive allergy names. Catalog taps and free text feed
/// the same list; duplicates are dropped on entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AllergyList {
    names: Vec<String>,
}

impl AllergyList {
    /// Appends a name, trimming edge whitespace. Empty and duplicate names
    /// are ignored. Returns whether the list changed.
    pub fn add(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.names.iter().any(|existing| existing == trimmed) {
            return false;
        }
        self.names.push(trimmed.to_string());
        true
    }

    /// Removes by exact string match (tag tap). Returns whether the list
    /// changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name);
        self.names.len() != before
    }

    /// The free-text path: every delimiter-terminated token is committed,
    /// and whatever follows the last delimiter stays pending. Pasted text
    /// with several delimiters commits each token in order.
    pub fn push_text(&mut self, text: &str) -> TextIntake {
        let ends_with_delimiter = text
            .chars()
            .next_back()
            .is_some_and(|last| last == ',' || last.is_whitespace());

        let mut tokens: Vec<&str> = delimiter_runs()
            .split(text)
            .filter(|token| !token.is_empty())
            .collect();

        let pending = if ends_with_delimiter {
            String::new()
        } else {
            tokens.pop().unwrap_or_default().to_string()
        };

        let mut committed = Vec::new();
        for token in tokens {
            if self.add(token) {
                committed.push(token.to_string());
            }
        }

        TextIntake { committed, pending }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
