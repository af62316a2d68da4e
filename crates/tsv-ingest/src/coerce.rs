//! Cell coercion: one raw cell in, one typed [`Value`] out.
//!
//! Every cell is trimmed first, then compared against the null sentinel. An
//! empty (or null) cell yields the zero value of its field type. Float parsing
//! has no range check of its own: text beyond the target precision's range
//! becomes an infinity rather than an error.

use tsv_model::{FieldType, NormalizationForm, Value};

use crate::config::DecoderConfig;
use crate::error::CoercionError;

/// Literals accepted as `true`.
pub const TRUE_LITERALS: &[&str] = &["1", "t", "T", "TRUE", "true", "True"];

/// Literals accepted as `false`.
pub const FALSE_LITERALS: &[&str] = &["0", "f", "F", "FALSE", "false", "False"];

/// Converts a raw cell into a value of the given field type.
pub fn coerce(
    raw: &str,
    kind: &FieldType,
    config: &DecoderConfig,
) -> Result<Value, CoercionError> {
    let cell = clean_cell(raw, config.null_sentinel());

    match kind {
        FieldType::Text => Ok(Value::Text(normalize(cell, config.normalization))),
        FieldType::Bool if cell.is_empty() => Ok(Value::Bool(false)),
        FieldType::Bool => parse_bool(cell).map(Value::Bool),
        FieldType::Int if cell.is_empty() => Ok(Value::Int(0)),
        FieldType::Int => cell
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|source| CoercionError::InvalidInt {
                value: cell.to_string(),
                source,
            }),
        FieldType::Float32 if cell.is_empty() => Ok(Value::Float32(0.0)),
        FieldType::Float32 => cell
            .parse::<f32>()
            .map(Value::Float32)
            .map_err(|source| CoercionError::InvalidFloat {
                value: cell.to_string(),
                source,
            }),
        FieldType::Float64 if cell.is_empty() => Ok(Value::Float64(0.0)),
        FieldType::Float64 => cell
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|source| CoercionError::InvalidFloat {
                value: cell.to_string(),
                source,
            }),
        FieldType::TextList => Ok(Value::TextList(split_list(
            cell,
            config.list_delimiter(),
            config.normalization,
        ))),
        FieldType::Unsupported(name) => Err(CoercionError::UnsupportedType(name.clone())),
    }
}

/// Trims a raw cell and blanks it if it equals the null sentinel.
pub fn clean_cell<'a>(raw: &'a str, null_sentinel: Option<&str>) -> &'a str {
    let trimmed = raw.trim();
    match null_sentinel {
        Some(sentinel) if trimmed == sentinel => "",
        _ => trimmed,
    }
}

/// Parses a boolean literal from [`TRUE_LITERALS`] or [`FALSE_LITERALS`].
pub fn parse_bool(cell: &str) -> Result<bool, CoercionError> {
    if TRUE_LITERALS.contains(&cell) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&cell) {
        Ok(false)
    } else {
        Err(CoercionError::InvalidBool {
            value: cell.to_string(),
        })
    }
}

/// Splits a cell into trimmed, non-empty, normalized items.
///
/// Order and duplicates are preserved. Without a delimiter the result is empty.
pub fn split_list(
    cell: &str,
    delimiter: Option<&str>,
    form: NormalizationForm,
) -> Vec<String> {
    let Some(delimiter) = delimiter else {
        return Vec::new();
    };
    cell.split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| normalize(item, form))
        .collect()
}

fn normalize(text: &str, form: NormalizationForm) -> String {
    form.apply(text).into_owned()
}
