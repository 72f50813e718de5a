//! Strongly-typed identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stock batch.
///
/// The server owns the format; the client treats it as an opaque string and
/// never inspects its structure beyond taking a display prefix. Blank ids are
/// rejected wherever an id enters from text, including deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `n` characters of the id (char-aware, never splits a code point).
    pub fn prefix(&self, n: usize) -> &str {
        match self.0.char_indices().nth(n) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl core::fmt::Display for BatchId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BatchId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(DomainError::invalid_id("BatchId: empty"));
        }
        Ok(Self(value))
    }
}

impl From<BatchId> for String {
    fn from(value: BatchId) -> Self {
        value.0
    }
}

impl FromStr for BatchId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_truncates_to_char_count() {
        let id = BatchId::new("0123456789abcdef");
        assert_eq!(id.prefix(8), "01234567");
    }

    #[test]
    fn prefix_of_short_id_is_whole_id() {
        let id = BatchId::new("abc");
        assert_eq!(id.prefix(8), "abc");
    }

    #[test]
    fn prefix_respects_multibyte_chars() {
        let id = BatchId::new("ééééééééé");
        assert_eq!(id.prefix(8), "éééééééé");
    }

    #[test]
    fn parse_rejects_blank() {
        let err = "  ".parse::<BatchId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn deserialize_rejects_blank() {
        let err = serde_json::from_str::<BatchId>("\"  \"").unwrap_err();
        assert!(err.to_string().contains("invalid identifier"));
    }

    #[test]
    fn deserializes_from_plain_string() {
        let id: BatchId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(id, BatchId::new("abc123"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = BatchId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    }
}
