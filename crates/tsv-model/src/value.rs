//! Typed cell values and the Rust types that hold them.

use serde::{Deserialize, Serialize};

use crate::field::FieldType;

/// A decoded cell, already converted to its destination field's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Bool(bool),
    Int(i64),
    Float32(f32),
    Float64(f64),
    TextList(Vec<String>),
}

impl Value {
    /// Returns the zero value for a field type, or `None` for unsupported types.
    pub fn zero(kind: &FieldType) -> Option<Self> {
        match kind {
            FieldType::Text => Some(Value::Text(String::new())),
            FieldType::Bool => Some(Value::Bool(false)),
            FieldType::Int => Some(Value::Int(0)),
            FieldType::Float32 => Some(Value::Float32(0.0)),
            FieldType::Float64 => Some(Value::Float64(0.0)),
            FieldType::TextList => Some(Value::TextList(Vec::new())),
            FieldType::Unsupported(_) => None,
        }
    }

    /// Returns the field type this value belongs to.
    pub fn kind(&self) -> FieldType {
        match self {
            Value::Text(_) => FieldType::Text,
            Value::Bool(_) => FieldType::Bool,
            Value::Int(_) => FieldType::Int,
            Value::Float32(_) => FieldType::Float32,
            Value::Float64(_) => FieldType::Float64,
            Value::TextList(_) => FieldType::TextList,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns either float width widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(x) => Some(f64::from(*x)),
            Value::Float64(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::TextList(items) => Some(items),
            _ => None,
        }
    }
}

/// A Rust type that can serve as a destination field.
///
/// Implemented for the six supported kinds. `store` hands the value back
/// unchanged when its kind does not match.
pub trait FieldValue {
    /// Field type declared by this Rust type.
    fn kind() -> FieldType;

    /// Overwrites `self` with `value`.
    fn store(&mut self, value: Value) -> Result<(), Value>;
}

macro_rules! impl_field_value {
    ($ty:ty, $variant:ident) => {
        impl FieldValue for $ty {
            fn kind() -> FieldType {
                FieldType::$variant
            }

            fn store(&mut self, value: Value) -> Result<(), Value> {
                match value {
                    Value::$variant(inner) => {
                        *self = inner;
                        Ok(())
                    }
                    other => Err(other),
                }
            }
        }
    };
}

impl_field_value!(String, Text);
impl_field_value!(bool, Bool);
impl_field_value!(i64, Int);
impl_field_value!(f32, Float32);
impl_field_value!(f64, Float64);
impl_field_value!(Vec<String>, TextList);
