//! Error types for writing values into destination records.

use thiserror::Error;

use crate::field::FieldType;

/// A value could not be written into a destination record.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AssignError {
    /// The record has no field at this index.
    #[error("record has no field at index {index}")]
    UnknownField { index: usize },

    /// The value's type does not match the field's declared type.
    #[error("field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: FieldType,
    },
}
