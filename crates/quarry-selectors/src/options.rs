//! Matching configuration.
//!
//! [Selectors Level 3 § 4 Characters and case sensitivity](https://www.w3.org/TR/selectors-3/#casesens)
//!
//! "All Selectors syntax is case-insensitive within the ASCII range ... The
//! case sensitivity of document language element names, attribute names, and
//! attribute values in selectors depends on the document language."

use serde::{Deserialize, Serialize};

/// How two strings are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseSensitivity {
    /// Byte-for-byte equality.
    #[default]
    CaseSensitive,
    /// Equality after ASCII lowercasing. Non-ASCII characters must match exactly.
    AsciiCaseInsensitive,
}

impl CaseSensitivity {
    /// Compare two strings.
    #[must_use]
    pub fn equals(self, a: &str, b: &str) -> bool {
        match self {
            Self::CaseSensitive => a == b,
            Self::AsciiCaseInsensitive => a.eq_ignore_ascii_case(b),
        }
    }

    /// Whether `haystack` begins with `needle`.
    #[must_use]
    pub fn starts_with(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::CaseSensitive => haystack.starts_with(needle),
            Self::AsciiCaseInsensitive => haystack
                .as_bytes()
                .get(..needle.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(needle.as_bytes())),
        }
    }

    /// Whether `haystack` ends with `needle`.
    #[must_use]
    pub fn ends_with(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::CaseSensitive => haystack.ends_with(needle),
            Self::AsciiCaseInsensitive => haystack
                .len()
                .checked_sub(needle.len())
                .and_then(|start| haystack.as_bytes().get(start..))
                .is_some_and(|suffix| suffix.eq_ignore_ascii_case(needle.as_bytes())),
        }
    }

    /// Whether `needle` occurs anywhere in `haystack`.
    #[must_use]
    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::CaseSensitive => haystack.contains(needle),
            Self::AsciiCaseInsensitive => haystack
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
        }
    }
}

/// Case-sensitivity rules applied while matching.
///
/// The default follows HTML: element names are compared ASCII
/// case-insensitively, attribute values exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MatchOptions {
    /// Comparison used by type selectors and the `*-of-type` pseudo-classes.
    pub element_names: CaseSensitivity,
    /// Comparison used by attribute value selectors.
    pub attribute_values: CaseSensitivity,
}

impl MatchOptions {
    /// HTML document conventions.
    #[must_use]
    pub const fn html() -> Self {
        Self {
            element_names: CaseSensitivity::AsciiCaseInsensitive,
            attribute_values: CaseSensitivity::CaseSensitive,
        }
    }

    /// XML document conventions: everything is case-sensitive.
    #[must_use]
    pub const fn xml() -> Self {
        Self {
            element_names: CaseSensitivity::CaseSensitive,
            attribute_values: CaseSensitivity::CaseSensitive,
        }
    }

    /// Return a copy with the given attribute value comparison.
    #[must_use]
    pub const fn with_attribute_values(mut self, sensitivity: CaseSensitivity) -> Self {
        self.attribute_values = sensitivity;
        self
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::html()
    }
}
