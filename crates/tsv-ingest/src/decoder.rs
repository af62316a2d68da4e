//! Pull-based record decoder.
//!
//! A [`Decoder`] owns its input stream and a resolved [`ColumnMapping`]. Each
//! call to [`Decoder::advance`] reads one row, coerces every mapped cell, and
//! writes the results into a caller-owned record. The decoder never keeps a
//! reference to the record between calls.
//!
//! # Usage
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
//!         #[tsv = "age"]
//!         pub age: i64,
//!     }
//! }
//!
//! let input = "age\tname\n10\talex\n\n24\tjohn\n";
//! let mut decoder = Decoder::for_record::<Person>(input.as_bytes(), DecoderConfig::default())?;
//! let mut person = Person::default();
//! let mut names = Vec::new();
//! while decoder.advance(&mut person)? == DecodeOutcome::Decoded {
//!     names.push(person.name.clone());
//! }
//! assert_eq!(names, vec!["alex", "john"]);
//! # Ok::<(), tsv_ingest::DecodeError>(())
//! ```

use std::io;

use csv::StringRecord;
use tsv_model::{AssignError, Layout, Record, Tabular, Value};

use crate::coerce::coerce;
use crate::config::{DecoderConfig, TagPolicy, WritePolicy};
use crate::error::{DecodeError, Result};
use crate::schema::{ColumnMapping, check_unambiguous};

/// Column separator of the input format.
pub const TSV_DELIMITER: u8 = b'\t';

/// Result of one successful [`Decoder::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A row was decoded into the record.
    Decoded,
    /// The stream is exhausted. Every later call returns this again.
    EndOfStream,
}

impl DecodeOutcome {
    pub fn is_end(self) -> bool {
        self == DecodeOutcome::EndOfStream
    }
}

/// Lifecycle of a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// No header was read and no row has been decoded yet.
    Uninitialized,
    /// Mapping resolved, waiting for the next row.
    Ready,
    /// The stream is exhausted.
    Done,
    /// The last call returned an error. The next call reads the next row.
    Failed,
}

/// Decodes tab-separated rows into destination records.
///
/// `advance` takes `&mut self`; callers sharing a decoder across threads must
/// serialize access themselves.
pub struct Decoder<R> {
    reader: csv::Reader<R>,
    layout: Layout,
    config: DecoderConfig,
    headers: Option<Vec<String>>,
    mapping: Option<ColumnMapping>,
    row: StringRecord,
    state: DecoderState,
    rows_decoded: u64,
}

impl<R: io::Read> Decoder<R> {
    /// Creates a decoder that reads one header line before returning.
    ///
    /// Fails if the header cannot be read, if the stream is empty, or, under
    /// [`TagPolicy::Strict`], if tags or header names are ambiguous.
    pub fn with_header(reader: R, layout: Layout, config: DecoderConfig) -> Result<Self> {
        let mut reader = build_reader(reader, &config);
        let mut record = StringRecord::new();
        let found = reader
            .read_record(&mut record)
            .map_err(|source| DecodeError::HeaderRead { source })?;
        if !found {
            return Err(DecodeError::MissingHeader);
        }

        let headers: Vec<String> = record.iter().map(str::to_string).collect();

        if config.tag_policy == TagPolicy::Strict {
            check_unambiguous(Some(headers.as_slice()), &layout)?;
        }

        let mapping = ColumnMapping::resolve(&headers, &layout);
        tracing::debug!(
            mode = %mapping.mode(),
            columns = headers.len(),
            mapped = mapping.mapped_count(),
            fields = layout.len(),
            "Resolved column mapping from header"
        );

        Ok(Self {
            reader,
            layout,
            config,
            headers: Some(headers),
            mapping: Some(mapping),
            row: StringRecord::new(),
            state: DecoderState::Ready,
            rows_decoded: 0,
        })
    }

    /// Creates a decoder for a stream without a header line.
    ///
    /// The mapping is positional and sized from the first non-blank row.
    pub fn without_header(reader: R, layout: Layout, config: DecoderConfig) -> Self {
        let reader = build_reader(reader, &config);
        Self {
            reader,
            layout,
            config,
            headers: None,
            mapping: None,
            row: StringRecord::new(),
            state: DecoderState::Uninitialized,
            rows_decoded: 0,
        }
    }

    /// Creates a header-reading decoder using `T`'s declared layout.
    pub fn for_record<T: Tabular>(reader: R, config: DecoderConfig) -> Result<Self> {
        Self::with_header(reader, T::layout(), config)
    }

    /// Creates a headerless decoder using `T`'s declared layout.
    pub fn for_record_without_header<T: Tabular>(reader: R, config: DecoderConfig) -> Self {
        Self::without_header(reader, T::layout(), config)
    }

    /// Decodes the next non-blank row into `record`.
    ///
    /// On a coercion failure under [`WritePolicy::InPlace`], fields mapped
    /// from earlier columns of the same row have already been overwritten.
    pub fn advance<T: Record + ?Sized>(&mut self, record: &mut T) -> Result<DecodeOutcome> {
        if self.state == DecoderState::Done {
            return Ok(DecodeOutcome::EndOfStream);
        }

        match self.read_row() {
            Ok(true) => {}
            Ok(false) => {
                self.state = DecoderState::Done;
                tracing::debug!(rows = self.rows_decoded, "Reached end of stream");
                return Ok(DecodeOutcome::EndOfStream);
            }
            Err(err) => {
                self.state = DecoderState::Failed;
                return Err(err);
            }
        }

        let mapping = self.mapping.get_or_insert_with(|| {
            let mapping = ColumnMapping::positional(self.row.len(), self.layout.len());
            tracing::debug!(
                columns = mapping.len(),
                mapped = mapping.mapped_count(),
                fields = self.layout.len(),
                "Resolved positional mapping from first row"
            );
            mapping
        });

        let line = self.row.position().map_or(0, csv::Position::line);
        let result = match self.config.write_policy {
            WritePolicy::InPlace => {
                write_in_place(&self.row, mapping, &self.layout, &self.config, line, record)
            }
            WritePolicy::AllOrNothing => {
                write_staged(&self.row, mapping, &self.layout, &self.config, line, record)
            }
        };

        match result {
            Ok(()) => {
                self.state = DecoderState::Ready;
                self.rows_decoded += 1;
                tracing::trace!(line, columns = self.row.len(), "Decoded row");
                Ok(DecodeOutcome::Decoded)
            }
            Err(err) => {
                self.state = DecoderState::Failed;
                Err(err)
            }
        }
    }

    /// Consumes the decoder and returns the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Reads the next row with at least one column into the row buffer.
    fn read_row(&mut self) -> Result<bool> {
        loop {
            let found = self
                .reader
                .read_record(&mut self.row)
                .map_err(|source| DecodeError::StreamRead { source })?;
            if !found {
                return Ok(false);
            }
            if !self.row.is_empty() {
                return Ok(true);
            }
        }
    }
}

impl<R> Decoder<R> {
    /// Returns the header names, if a header was read.
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Returns the column mapping once it has been resolved.
    pub fn mapping(&self) -> Option<&ColumnMapping> {
        self.mapping.as_ref()
    }

    /// Returns the destination layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the configuration captured at construction.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Returns the number of rows decoded successfully.
    pub fn rows_decoded(&self) -> u64 {
        self.rows_decoded
    }

    /// Returns the input line of the most recently read row.
    pub fn line(&self) -> u64 {
        self.row.position().map_or(0, csv::Position::line)
    }
}

impl<R> std::fmt::Debug for Decoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("layout", &self.layout)
            .field("config", &self.config)
            .field("headers", &self.headers)
            .field("mapping", &self.mapping)
            .field("state", &self.state)
            .field("rows_decoded", &self.rows_decoded)
            .finish_non_exhaustive()
    }
}

fn build_reader<R: io::Read>(reader: R, config: &DecoderConfig) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(TSV_DELIMITER)
        .has_headers(false)
        .flexible(!config.strict_column_count)
        .from_reader(reader)
}

/// Coerces one mapped cell.
fn coerce_cell(
    raw: &str,
    column: usize,
    index: usize,
    layout: &Layout,
    config: &DecoderConfig,
    line: u64,
) -> Result<Value> {
    let field = layout.get(index).ok_or(DecodeError::Assign {
        line,
        source: AssignError::UnknownField { index },
    })?;
    coerce(raw, &field.kind, config).map_err(|source| DecodeError::Coercion {
        line,
        column,
        field: field.name.clone(),
        source,
    })
}

fn write_in_place<T: Record + ?Sized>(
    row: &StringRecord,
    mapping: &ColumnMapping,
    layout: &Layout,
    config: &DecoderConfig,
    line: u64,
    record: &mut T,
) -> Result<()> {
    for (column, raw) in row.iter().enumerate() {
        let Some(index) = mapping.target(column).field() else {
            continue;
        };
        let value = coerce_cell(raw, column, index, layout, config, line)?;
        record
            .assign(index, value)
            .map_err(|source| DecodeError::Assign { line, source })?;
    }
    Ok(())
}

fn write_staged<T: Record + ?Sized>(
    row: &StringRecord,
    mapping: &ColumnMapping,
    layout: &Layout,
    config: &DecoderConfig,
    line: u64,
    record: &mut T,
) -> Result<()> {
    let mut staged = Vec::with_capacity(mapping.mapped_count());
    for (column, raw) in row.iter().enumerate() {
        if let Some(index) = mapping.target(column).field() {
            staged.push((index, coerce_cell(raw, column, index, layout, config, line)?));
        }
    }
    for (index, value) in staged {
        record
            .assign(index, value)
            .map_err(|source| DecodeError::Assign { line, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoercionError;
    use tsv_model::{DynamicRecord, FieldSpec, FieldType};

    fn layout() -> Layout {
        Layout::new(vec![
            FieldSpec::tagged("name", "name", FieldType::Text),
            FieldSpec::tagged("age", "age", FieldType::Int),
            FieldSpec::tagged("active", "active", FieldType::Bool),
        ])
    }

    #[test]
    fn test_with_header_reads_header() {
        let input = "\u{feff}name\tage\tactive\nalex\t10\ttrue\n";
        let decoder = Decoder::with_header(input.as_bytes(), layout(), DecoderConfig::default())
            .unwrap();
        assert_eq!(
            decoder.headers(),
            Some(&["name".to_string(), "age".to_string(), "active".to_string()][..])
        );
        assert_eq!(decoder.state(), DecoderState::Ready);
        assert_eq!(decoder.mapping().unwrap().mapped_count(), 3);
    }

    #[test]
    fn test_byte_order_mark_without_header() {
        let layout = Layout::new(vec![
            FieldSpec::new("age", FieldType::Int),
            FieldSpec::new("name", FieldType::Text),
        ]);
        let input = "\u{feff}10\talex\n";
        let mut decoder =
            Decoder::without_header(input.as_bytes(), layout.clone(), DecoderConfig::default());
        let mut record = DynamicRecord::new(layout);
        assert_eq!(decoder.advance(&mut record).unwrap(), DecodeOutcome::Decoded);
        assert_eq!(record.get(0), Some(&Value::Int(10)));
        assert_eq!(record.get(1), Some(&Value::Text("alex".into())));
    }

    #[test]
    fn test_with_header_on_empty_stream() {
        let err = Decoder::with_header(&b""[..], layout(), DecoderConfig::default()).unwrap_err();
        assert!(matches!(err, DecodeError::MissingHeader));
    }

    #[test]
    fn test_strict_policy_rejects_repeated_header() {
        let config = DecoderConfig::default().with_tag_policy(TagPolicy::Strict);
        let err = Decoder::with_header(&b"name\tname\n"[..], layout(), config).unwrap_err();
        assert!(matches!(err, DecodeError::AmbiguousTagMapping { .. }));
    }

    #[test]
    fn test_without_header_is_uninitialized_until_first_row() {
        let mut decoder =
            Decoder::without_header(&b"alex\t10\n"[..], layout(), DecoderConfig::default());
        assert_eq!(decoder.state(), DecoderState::Uninitialized);
        assert!(decoder.mapping().is_none());

        let mut record = DynamicRecord::new(layout());
        assert_eq!(decoder.advance(&mut record).unwrap(), DecodeOutcome::Decoded);
        assert_eq!(decoder.mapping().unwrap().len(), 2);
        assert_eq!(record.get(1), Some(&Value::Int(10)));
        assert_eq!(decoder.state(), DecoderState::Ready);
    }

    #[test]
    fn test_end_of_stream_is_terminal() {
        let mut decoder =
            Decoder::with_header(&b"name\n"[..], layout(), DecoderConfig::default()).unwrap();
        let mut record = DynamicRecord::new(layout());
        for _ in 0..3 {
            assert_eq!(
                decoder.advance(&mut record).unwrap(),
                DecodeOutcome::EndOfStream
            );
        }
        assert_eq!(decoder.state(), DecoderState::Done);
    }

    #[test]
    fn test_error_marks_failed_then_recovers() {
        let input = "name\tage\nalex\tx\njohn\t24\n";
        let mut decoder =
            Decoder::with_header(input.as_bytes(), layout(), DecoderConfig::default()).unwrap();
        let mut record = DynamicRecord::new(layout());

        let err = decoder.advance(&mut record).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Coercion {
                line: 2,
                column: 1,
                source: CoercionError::InvalidInt { .. },
                ..
            }
        ));
        assert_eq!(decoder.state(), DecoderState::Failed);

        assert_eq!(decoder.advance(&mut record).unwrap(), DecodeOutcome::Decoded);
        assert_eq!(record.get(0), Some(&Value::Text("john".into())));
        assert_eq!(decoder.rows_decoded(), 1);
        assert_eq!(decoder.line(), 3);
    }

    #[test]
    fn test_strict_column_count_surfaces_stream_error() {
        let config = DecoderConfig::default().with_strict_column_count(true);
        let input = "name\tage\nalex\t10\textra\njohn\t24\n";
        let mut decoder = Decoder::with_header(input.as_bytes(), layout(), config).unwrap();
        let mut record = DynamicRecord::new(layout());
        let err = decoder.advance(&mut record).unwrap_err();
        assert!(err.is_stream());
        assert_eq!(decoder.advance(&mut record).unwrap(), DecodeOutcome::Decoded);
    }

    #[test]
    fn test_into_inner_returns_stream() {
        let decoder =
            Decoder::without_header(io::Cursor::new("a\n"), layout(), DecoderConfig::default());
        let inner = decoder.into_inner();
        assert_eq!(inner.get_ref(), &"a\n");
    }
}
