//! Error types for TSV decoding.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;
use tsv_model::AssignError;

/// A single cell could not be converted to its field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CoercionError {
    /// Cell is not a recognised boolean literal.
    #[error("invalid boolean '{value}'")]
    InvalidBool { value: String },

    /// Cell is not a base-10 integer, or is out of range.
    #[error("invalid integer '{value}': {source}")]
    InvalidInt {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Cell is not a decimal floating point number.
    #[error("invalid float '{value}': {source}")]
    InvalidFloat {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// Field is declared with a type the decoder cannot fill.
    #[error("unsupported field type: {0}")]
    UnsupportedType(String),
}

/// Errors surfaced while constructing a decoder or advancing it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    // === Stream Errors ===
    /// The header line could not be read at construction.
    #[error("failed to read header: {source}")]
    HeaderRead {
        #[source]
        source: csv::Error,
    },

    /// The stream ended before a header line was found.
    #[error("stream is empty, expected a header line")]
    MissingHeader,

    /// The underlying tokenizer or reader failed.
    #[error("failed to read record: {source}")]
    StreamRead {
        #[source]
        source: csv::Error,
    },

    // === Row Errors ===
    /// A mapped cell could not be coerced to its field's type.
    #[error("line {line}, column {column} (field '{field}'): {source}")]
    Coercion {
        line: u64,
        column: usize,
        field: String,
        #[source]
        source: CoercionError,
    },

    /// The destination record rejected a coerced value.
    #[error("line {line}: {source}")]
    Assign {
        line: u64,
        #[source]
        source: AssignError,
    },

    // === Schema Errors ===
    /// A tag or header name resolves to more than one candidate under strict tag policy.
    #[error("ambiguous tag mapping for '{tag}'")]
    AmbiguousTagMapping { tag: String },
}

impl DecodeError {
    /// Returns true if a cell failed type conversion.
    pub fn is_coercion(&self) -> bool {
        matches!(self, Self::Coercion { .. })
    }

    /// Returns true if the underlying stream failed.
    pub fn is_stream(&self) -> bool {
        matches!(self, Self::StreamRead { .. } | Self::HeaderRead { .. })
    }

    /// Returns the cell-level cause, if any.
    pub fn coercion(&self) -> Option<&CoercionError> {
        match self {
            Self::Coercion { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion_error_display() {
        let source = "x".parse::<i64>().unwrap_err();
        let err = DecodeError::Coercion {
            line: 3,
            column: 1,
            field: "age".to_string(),
            source: CoercionError::InvalidInt {
                value: "x".to_string(),
                source,
            },
        };
        assert_eq!(
            err.to_string(),
            "line 3, column 1 (field 'age'): invalid integer 'x': invalid digit found in string"
        );
        assert!(err.is_coercion());
        assert!(!err.is_stream());
        assert!(matches!(
            err.coercion(),
            Some(CoercionError::InvalidInt { .. })
        ));
    }

    #[test]
    fn test_unsupported_type_display() {
        let err = CoercionError::UnsupportedType("[]byte".to_string());
        assert_eq!(err.to_string(), "unsupported field type: []byte");
    }

    #[test]
    fn test_missing_header_display() {
        assert_eq!(
            DecodeError::MissingHeader.to_string(),
            "stream is empty, expected a header line"
        );
    }
}
