//! Unicode normalization of decoded text.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Unicode normalization form applied to text and list-of-text values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationForm {
    /// Text passes through unchanged.
    #[default]
    None,
    /// Canonical composition.
    Nfc,
    /// Canonical decomposition.
    Nfd,
    /// Compatibility composition.
    Nfkc,
    /// Compatibility decomposition.
    Nfkd,
}

impl NormalizationForm {
    /// Returns the form name as used in configuration.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NormalizationForm::None => "none",
            NormalizationForm::Nfc => "nfc",
            NormalizationForm::Nfd => "nfd",
            NormalizationForm::Nfkc => "nfkc",
            NormalizationForm::Nfkd => "nfkd",
        }
    }

    /// Returns true unless the form is [`NormalizationForm::None`].
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, NormalizationForm::None)
    }

    /// Normalizes `text`, borrowing when no form is configured.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            NormalizationForm::None => Cow::Borrowed(text),
            NormalizationForm::Nfc => Cow::Owned(text.nfc().collect()),
            NormalizationForm::Nfd => Cow::Owned(text.nfd().collect()),
            NormalizationForm::Nfkc => Cow::Owned(text.nfkc().collect()),
            NormalizationForm::Nfkd => Cow::Owned(text.nfkd().collect()),
        }
    }
}

impl std::fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NormalizationForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(NormalizationForm::None),
            "nfc" => Ok(NormalizationForm::Nfc),
            "nfd" => Ok(NormalizationForm::Nfd),
            "nfkc" => Ok(NormalizationForm::Nfkc),
            "nfkd" => Ok(NormalizationForm::Nfkd),
            _ => Err(format!("Unknown normalization form: {s}")),
        }
    }
}
