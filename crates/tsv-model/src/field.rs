//! Destination field descriptions.
//!
//! A [`Layout`] is the ordered list of [`FieldSpec`]s a destination record
//! exposes. The position of a field within its layout is the index the decoder
//! passes back to [`Record::assign`](crate::Record::assign).

use serde::{Deserialize, Serialize};

/// Semantic type of a destination field.
///
/// Serializes as its type name, so `"int"`, `"list"` and `"[]string"` are all
/// valid in a layout file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FieldType {
    /// UTF-8 text.
    Text,
    /// Boolean flag.
    Bool,
    /// Base-10 signed 64-bit integer.
    Int,
    /// Single-precision float.
    Float32,
    /// Double-precision float.
    Float64,
    /// Delimited list of text items.
    TextList,
    /// A declared type the decoder cannot fill, kept by name for error reporting.
    Unsupported(String),
}

impl FieldType {
    /// Returns the canonical type name.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "string",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float32 => "float32",
            FieldType::Float64 => "float64",
            FieldType::TextList => "[]string",
            FieldType::Unsupported(name) => name,
        }
    }

    /// Returns true for the six kinds the decoder can fill.
    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldType::Unsupported(_))
    }

    /// Returns true for kinds that receive Unicode normalization.
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::TextList)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FieldType {
    type Err = std::convert::Infallible;

    /// Parses a declared type name. Unknown names become [`FieldType::Unsupported`]
    /// so the failure surfaces when a cell is decoded, not when the layout is built.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(match normalized.as_str() {
            "string" | "text" | "str" => FieldType::Text,
            "bool" | "boolean" => FieldType::Bool,
            "int" | "integer" | "i64" => FieldType::Int,
            "float32" | "f32" => FieldType::Float32,
            "float64" | "f64" | "float" | "double" => FieldType::Float64,
            "[]string" | "list" | "vec<string>" => FieldType::TextList,
            _ => FieldType::Unsupported(s.trim().to_string()),
        })
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<FieldType> for String {
    fn from(kind: FieldType) -> Self {
        kind.as_str().to_string()
    }
}

/// One named, typed slot in a destination record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as declared on the destination type.
    pub name: String,
    /// External column name this field binds to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Semantic type of the field.
    pub kind: FieldType,
}

impl FieldSpec {
    /// Creates an untagged field.
    pub fn new(name: impl Into<String>, kind: FieldType) -> Self {
        Self {
            name: name.into(),
            tag: None,
            kind,
        }
    }

    /// Creates a field bound to a header column.
    pub fn tagged(name: impl Into<String>, tag: impl Into<String>, kind: FieldType) -> Self {
        Self {
            name: name.into(),
            tag: Some(tag.into()),
            kind,
        }
    }

    /// Returns the declared tag, treating an empty tag as absent.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|tag| !tag.is_empty())
    }
}

/// Ordered field list of a destination record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    fields: Vec<FieldSpec>,
}

impl Layout {
    /// Creates a layout from fields in declaration order.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the layout declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field at `index`.
    pub fn get(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
        self.fields.iter()
    }

    /// Returns the fields as a slice.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns true if at least one field declares a tag.
    pub fn has_tags(&self) -> bool {
        self.fields.iter().any(|field| field.tag().is_some())
    }

    /// Returns the first-declared field carrying `tag`.
    pub fn position_of_tag(&self, tag: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.tag() == Some(tag))
    }

    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

impl FromIterator<FieldSpec> for Layout {
    fn from_iter<I: IntoIterator<Item = FieldSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_from_str() {
        assert_eq!("string".parse::<FieldType>().unwrap(), FieldType::Text);
        assert_eq!("Boolean".parse::<FieldType>().unwrap(), FieldType::Bool);
        assert_eq!("int".parse::<FieldType>().unwrap(), FieldType::Int);
        assert_eq!("float32".parse::<FieldType>().unwrap(), FieldType::Float32);
        assert_eq!("f64".parse::<FieldType>().unwrap(), FieldType::Float64);
        assert_eq!("[]string".parse::<FieldType>().unwrap(), FieldType::TextList);
        assert_eq!(
            "map[string]int".parse::<FieldType>().unwrap(),
            FieldType::Unsupported("map[string]int".to_string())
        );
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::TextList.to_string(), "[]string");
        assert_eq!(FieldType::Unsupported("u8".into()).to_string(), "u8");
    }

    #[test]
    fn test_layout_tags() {
        let layout = Layout::new(vec![
            FieldSpec::new("id", FieldType::Int),
            FieldSpec::tagged("name", "name", FieldType::Text),
            FieldSpec::tagged("alias", "name", FieldType::Text),
        ]);
        assert!(layout.has_tags());
        assert_eq!(layout.position_of_tag("name"), Some(1));
        assert_eq!(layout.position_of_tag("id"), None);
        assert_eq!(layout.field_names(), vec!["id", "name", "alias"]);
    }

    #[test]
    fn test_layout_serde_uses_type_names() {
        let layout: Layout = serde_json::from_str(
            r#"[
                {"name": "age", "tag": "age", "kind": "int"},
                {"name": "names", "kind": "list"},
                {"name": "raw", "kind": "u8"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            layout,
            Layout::new(vec![
                FieldSpec::tagged("age", "age", FieldType::Int),
                FieldSpec::new("names", FieldType::TextList),
                FieldSpec::new("raw", FieldType::Unsupported("u8".into())),
            ])
        );

        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"age","tag":"age","kind":"int"},{"name":"names","kind":"[]string"},{"name":"raw","kind":"u8"}]"#
        );
        assert_eq!(serde_json::from_str::<Layout>(&json).unwrap(), layout);
    }

    #[test]
    fn test_empty_tag_is_untagged() {
        let layout = Layout::new(vec![FieldSpec::tagged("a", "", FieldType::Text)]);
        assert!(!layout.has_tags());
    }
}
