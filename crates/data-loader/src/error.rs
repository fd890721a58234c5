//! Error types for the data-loader crate.
//!
//! A malformed line is never coerced into a default value: it either
//! aborts the load or is skipped, depending on the `ParsePolicy`.

use thiserror::Error;

/// A single line that could not be turned into a record.
///
/// Every variant carries the file name and the 1-based line number so the
/// offending input can be located.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Line did not split into the expected number of `::` fields
    #[error("{file} line {line}: expected {expected} fields but found {found}")]
    FieldCount {
        file: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A field could not be converted to its declared type
    #[error("{file} line {line}: invalid {field} '{value}': {reason}")]
    InvalidField {
        file: &'static str,
        line: usize,
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl ParseError {
    /// Line number the error refers to
    pub fn line(&self) -> usize {
        match self {
            ParseError::FieldCount { line, .. } | ParseError::InvalidField { line, .. } => *line,
        }
    }
}

/// Errors that can occur while building a `Dataset`
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// A line could not be parsed and the policy is `Abort`
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_names_line_and_field() {
        let err = ParseError::InvalidField {
            file: "ratings.dat",
            line: 7,
            field: "rating",
            value: "x".to_string(),
            reason: "invalid digit found in string".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("ratings.dat line 7"));
        assert!(msg.contains("rating 'x'"));
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_parse_error_converts_into_load_error() {
        let err: DataLoadError = ParseError::FieldCount {
            file: "users.dat",
            line: 3,
            expected: 5,
            found: 2,
        }
        .into();

        assert!(matches!(err, DataLoadError::Parse(_)));
        assert!(err.to_string().contains("expected 5 fields but found 2"));
    }
}
