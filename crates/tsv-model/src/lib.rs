//! Destination record model for typed TSV decoding.
//!
//! This crate describes *where* decoded cells go; `tsv-ingest` decides *how*
//! they are read and converted.
//!
//! # Module Organization
//!
//! - [`field`]: Field types, field specs, and record layouts
//! - [`value`]: Typed cell values and the [`FieldValue`] storage trait
//! - [`record`]: The [`Record`] / [`Tabular`] traits and [`DynamicRecord`]
//! - [`normalize`]: Unicode normalization forms for text values
//!
//! # Example
//!
//! ```
//! use tsv_model::{FieldType, Record, Tabular, Value, tsv_record};
//!
//! tsv_record! {
//!     #[derive(Debug, Default)]
//!     pub struct Person {
//!         #[tsv = "name"]
//!         pub name: String,
//!         #[tsv = "middleNames"]
//!         pub middle_names: Vec<String>,
//!     }
//! }
//!
//! let layout = Person::layout();
//! assert_eq!(layout.get(1).map(|f| &f.kind), Some(&FieldType::TextList));
//!
//! let mut person = Person::default();
//! person.assign(0, Value::Text("alex".into())).unwrap();
//! assert_eq!(person.name, "alex");
//! ```

pub mod error;
pub mod field;
mod macros;
pub mod normalize;
pub mod record;
pub mod value;

// === Error Types ===
pub use error::AssignError;

// === Layout ===
pub use field::{FieldSpec, FieldType, Layout};

// === Values ===
pub use value::{FieldValue, Value};

// === Records ===
pub use record::{DynamicRecord, Record, Tabular};

// === Normalization ===
pub use normalize::NormalizationForm;
