//! Column-to-field resolution.
//!
//! A [`ColumnMapping`] is built once per decoder and never changes. In tagged
//! mode each header name is matched against declared field tags; in
//! positional mode column `i` feeds field `i`.

use std::collections::{BTreeMap, BTreeSet};

use tsv_model::Layout;

use crate::error::{DecodeError, Result};

/// Where one input column goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnTarget {
    /// The column feeds the field at this layout index.
    Mapped(usize),
    /// The column is read and discarded.
    Skipped,
}

impl ColumnTarget {
    /// Returns the field index for a mapped column.
    pub fn field(self) -> Option<usize> {
        match self {
            ColumnTarget::Mapped(index) => Some(index),
            ColumnTarget::Skipped => None,
        }
    }
}

/// How a mapping was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingMode {
    /// Header names matched against field tags.
    Tagged,
    /// Column position equals field position.
    Positional,
}

impl MappingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingMode::Tagged => "tagged",
            MappingMode::Positional => "positional",
        }
    }
}

impl std::fmt::Display for MappingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One target per input column.
///
/// Every mapped field index is valid for the layout the mapping was resolved
/// against and appears at most once. Columns beyond the resolved width are
/// treated as [`ColumnTarget::Skipped`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    mode: MappingMode,
    targets: Vec<ColumnTarget>,
}

impl ColumnMapping {
    /// Resolves a mapping from a header row.
    ///
    /// Tagged mode applies when at least one field declares a tag; otherwise
    /// the mapping is positional over the header's width. Streams without a
    /// header use [`ColumnMapping::positional`] once the first row's width is
    /// known. Resolution never fails.
    pub fn resolve(header: &[String], layout: &Layout) -> Self {
        if layout.has_tags() {
            Self::tagged(header, layout)
        } else {
            Self::positional(header.len(), layout.len())
        }
    }

    /// Maps column `i` to field `i` for `i < min(columns, fields)`.
    pub fn positional(columns: usize, fields: usize) -> Self {
        let targets = (0..columns)
            .map(|i| {
                if i < fields {
                    ColumnTarget::Mapped(i)
                } else {
                    ColumnTarget::Skipped
                }
            })
            .collect();
        Self {
            mode: MappingMode::Positional,
            targets,
        }
    }

    /// Matches header names against declared tags.
    ///
    /// Tie-breaks: a tag declared on several fields binds the first-declared
    /// field, and a header name repeated across columns binds only its first
    /// column. Later duplicates are skipped.
    pub fn tagged(header: &[String], layout: &Layout) -> Self {
        for tag in duplicated_tags(layout) {
            tracing::warn!(tag = %tag, "Tag declared on several fields, first-declared field wins");
        }

        let mut bound = vec![false; layout.len()];
        let targets = header
            .iter()
            .enumerate()
            .map(|(column, name)| match layout.position_of_tag(name) {
                Some(field) if !bound[field] => {
                    bound[field] = true;
                    ColumnTarget::Mapped(field)
                }
                Some(_) => {
                    tracing::warn!(
                        column,
                        header = %name,
                        "Header name repeated, column skipped"
                    );
                    ColumnTarget::Skipped
                }
                None => ColumnTarget::Skipped,
            })
            .collect();

        Self {
            mode: MappingMode::Tagged,
            targets,
        }
    }

    /// Returns the resolution mode.
    pub fn mode(&self) -> MappingMode {
        self.mode
    }

    /// Returns the target for a column index.
    pub fn target(&self, column: usize) -> ColumnTarget {
        self.targets
            .get(column)
            .copied()
            .unwrap_or(ColumnTarget::Skipped)
    }

    /// Returns the number of resolved columns.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if no column was resolved.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns the number of mapped columns.
    pub fn mapped_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|target| matches!(target, ColumnTarget::Mapped(_)))
            .count()
    }

    /// Iterates targets in column order.
    pub fn iter(&self) -> impl Iterator<Item = ColumnTarget> + '_ {
        self.targets.iter().copied()
    }
}

/// Fails if a tag is declared on several fields or, in tagged mode, a header
/// name that binds a tag is repeated.
pub fn check_unambiguous(header: Option<&[String]>, layout: &Layout) -> Result<()> {
    if let Some(tag) = duplicated_tags(layout).into_iter().next() {
        return Err(DecodeError::AmbiguousTagMapping { tag });
    }

    if let Some(names) = header.filter(|_| layout.has_tags()) {
        let mut seen = BTreeSet::new();
        for name in names {
            if layout.position_of_tag(name).is_some() && !seen.insert(name.as_str()) {
                return Err(DecodeError::AmbiguousTagMapping { tag: name.clone() });
            }
        }
    }

    Ok(())
}

/// Returns tags declared on more than one field, in first-declared order.
fn duplicated_tags(layout: &Layout) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut order = Vec::new();
    for tag in layout.iter().filter_map(|field| field.tag()) {
        let count = counts.entry(tag).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(tag.to_string());
        }
    }
    order
}
