//! Opaque entity identifiers.
//!
//! Stored data may carry either numeric or textual ids, so the id type accepts both
//! and never interprets its contents.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a persisted entity or user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Numeric id.
    Number(u64),
    /// Textual id (UUIDs, object ids, ...).
    Text(String),
}

impl Id {
    /// Creates a new random, time-ordered id (UUID v7).
    #[must_use]
    pub fn generate() -> Self {
        Self::Text(Uuid::now_v7().to_string())
    }

    /// Returns true for the empty text id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(text) => text.is_empty(),
        }
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_and_non_empty() {
        let first = Id::generate();
        let second = Id::generate();
        assert_ne!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_empty_only_for_text() {
        assert!(Id::from("").is_empty());
        assert!(!Id::from("abc").is_empty());
        assert!(!Id::from(0).is_empty());
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let number: Id = serde_json::from_str("17").unwrap();
        assert_eq!(number, Id::Number(17));

        let text: Id = serde_json::from_str("\"5e1f\"").unwrap();
        assert_eq!(text, Id::Text("5e1f".to_string()));

        assert_eq!(serde_json::to_string(&Id::Number(3)).unwrap(), "3");
    }

    #[test]
    fn test_display() {
        assert_eq!(Id::Number(12).to_string(), "12");
        assert_eq!(Id::from("a1").to_string(), "a1");
    }
}
