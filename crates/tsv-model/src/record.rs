//! Destination record traits.
//!
//! The decoder never introspects a destination type. Instead the type exposes
//! its [`Layout`] up front ([`Tabular`]) and accepts values by field index
//! ([`Record`]). Both impls are normally generated by [`tsv_record!`](crate::tsv_record);
//! [`DynamicRecord`] covers layouts only known at runtime.

use crate::error::AssignError;
use crate::field::{FieldSpec, Layout};
use crate::value::Value;

/// A destination that accepts decoded values by field index.
pub trait Record {
    /// Overwrites the field at `index` with `value`.
    fn assign(&mut self, index: usize, value: Value) -> Result<(), AssignError>;
}

/// A destination type whose layout is fixed at compile time.
pub trait Tabular: Record {
    /// Returns the field layout in declaration order.
    fn layout() -> Layout;
}

impl<T: Record + ?Sized> Record for &mut T {
    fn assign(&mut self, index: usize, value: Value) -> Result<(), AssignError> {
        (**self).assign(index, value)
    }
}

/// A record whose fields are described by a runtime [`Layout`].
///
/// Every supported field starts at its zero value. Fields of an unsupported
/// type hold no value and can never be assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    layout: Layout,
    values: Vec<Option<Value>>,
}

impl DynamicRecord {
    /// Creates a zero-initialised record for `layout`.
    pub fn new(layout: Layout) -> Self {
        let values = layout.iter().map(|field| Value::zero(&field.kind)).collect();
        Self { layout, values }
    }

    /// Returns the layout this record was built from.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the value at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Returns the value of the first field named `name`.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        let index = self.layout.iter().position(|field| field.name == name)?;
        self.get(index)
    }

    /// Iterates `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldSpec, Option<&Value>)> {
        self.layout
            .iter()
            .zip(self.values.iter().map(Option::as_ref))
    }

    /// Resets every field to its zero value.
    pub fn clear(&mut self) {
        for (slot, field) in self.values.iter_mut().zip(self.layout.iter()) {
            *slot = Value::zero(&field.kind);
        }
    }
}

impl Record for DynamicRecord {
    fn assign(&mut self, index: usize, value: Value) -> Result<(), AssignError> {
        let field = self
            .layout
            .get(index)
            .ok_or(AssignError::UnknownField { index })?;
        let found = value.kind();
        if found != field.kind {
            return Err(AssignError::TypeMismatch {
                field: field.name.clone(),
                expected: field.kind.clone(),
                found,
            });
        }
        self.values[index] = Some(value);
        Ok(())
    }
}
