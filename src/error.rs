//! Typed errors for the engine and the catalog loader.
//!
//! Library operations return these; the binary wraps them in `anyhow` with
//! context before reporting.

use crate::song::Field;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by filtering and sampling.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// The mood needs fields the catalog never declared. Distinct from an
    /// empty result: the dataset cannot express this mood at all.
    #[error("mood '{mood}' needs {} which the catalog does not provide", join_fields(.missing))]
    SchemaMismatch { mood: String, missing: Vec<Field> },

    /// Nothing to draw from.
    #[error("no songs to choose from")]
    EmptySelection,

    #[error("sample size must be at least 1")]
    InvalidSampleSize,
}

/// Errors raised while loading a catalog from a CSV source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read catalog {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog source has no header row")]
    Empty,

    /// A mandatory column is missing. `expected` lists every accepted name.
    #[error("catalog has no '{column}' column (looked for: {})", .expected.join(", "))]
    SchemaMismatch {
        column: &'static str,
        expected: Vec<String>,
    },

    #[error("row {line} has {found} cells but the header has {expected}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("quoted field starting on row {line} is never closed")]
    UnterminatedQuote { line: usize },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.column())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_message_lists_fields() {
        let err = EngineError::SchemaMismatch {
            mood: "chill".to_string(),
            missing: vec![Field::Valence, Field::Energy],
        };
        assert_eq!(
            err.to_string(),
            "mood 'chill' needs valence, energy which the catalog does not provide"
        );
    }

    #[test]
    fn test_load_schema_mismatch_message() {
        let err = LoadError::SchemaMismatch {
            column: "artist",
            expected: vec!["artist".to_string(), "artist_name".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "catalog has no 'artist' column (looked for: artist, artist_name)"
        );
    }

    #[test]
    fn test_unterminated_quote_message() {
        let err = LoadError::UnterminatedQuote { line: 2 };
        assert_eq!(err.to_string(), "quoted field starting on row 2 is never closed");
    }
}
