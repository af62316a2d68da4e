//! Typed TSV ingestion.
//!
//! This crate decodes tab-separated streams into strongly-typed records,
//! one row per call, writing each row into a caller-owned destination.
//!
//! # Features
//!
//! - **Schema Resolution**: Bind header columns to fields by tag, or by position
//! - **Cell Coercion**: Text, bool, int, float32, float64, and delimited text lists
//! - **Null Sentinels**: Treat a reserved token (e.g. `\N`) as an empty cell
//! - **Unicode Normalization**: Optional NFC/NFD/NFKC/NFKD for text values
//!
//! # Example
//!
//! ```
//! use tsv_ingest::{DecodeOutcome, Decoder, DecoderConfig};
//! use tsv_model::tsv_record;
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
//! let input = "name\tmiddleNames\nalex\t  Ann , ,Marie  \n";
//! let config = DecoderConfig::new(",", "\\N");
//! let mut decoder = Decoder::for_record::<Person>(input.as_bytes(), config)?;
//!
//! let mut person = Person::default();
//! assert_eq!(decoder.advance(&mut person)?, DecodeOutcome::Decoded);
//! assert_eq!(person.middle_names, vec!["Ann", "Marie"]);
//! assert_eq!(decoder.advance(&mut person)?, DecodeOutcome::EndOfStream);
//! # Ok::<(), tsv_ingest::DecodeError>(())
//! ```

mod coerce;
mod config;
mod decoder;
mod error;
mod schema;

// === Error Types ===
pub use error::{CoercionError, DecodeError, Result};

// === Configuration ===
pub use config::{DecoderConfig, TagPolicy, WritePolicy};

// === Schema Resolution ===
pub use schema::{ColumnMapping, ColumnTarget, MappingMode, check_unambiguous};

// === Cell Coercion ===
pub use coerce::{FALSE_LITERALS, TRUE_LITERALS, clean_cell, coerce, parse_bool, split_list};

// === Decoding ===
pub use decoder::{DecodeOutcome, Decoder, DecoderState, TSV_DELIMITER};
