//! Style Extractor - parses the `layout-css` microformat.
//!
//! Grammar: `decl (";" decl)*` with `decl := name ":" value`. Names and values
//! are trimmed; values that read as numbers become [`StyleValue::Number`].
//!
//! Extraction never fails. Declarations without exactly one `:` are dropped
//! and reported in [`ParsedStyle::skipped`], which lenient callers ignore.

use std::fmt;

use indexmap::IndexMap;

use crate::dom::{Document, NodeId};
use crate::error::StyleDiagnostic;

// =============================================================================
// StyleValue
// =============================================================================

/// A declaration value after numeric coercion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Coerce raw declaration text.
    pub fn parse(text: &str) -> Self {
        match coerce_number(text) {
            Some(n) => StyleValue::Number(n),
            None => StyleValue::Text(text.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{n}"),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

// =============================================================================
// StyleMap
// =============================================================================

/// Property name → value, in first-declared order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StyleMap {
    entries: IndexMap<String, StyleValue>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.entries.get(name)
    }

    /// Set a property. A later declaration of the same name replaces the
    /// value but keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<StyleValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove every spelling of a property (`width`, `WIDTH`, `wid-th`, ...)
    /// and return how many entries went.
    pub fn remove_property(&mut self, name: &str) -> usize {
        let key = normalize_property(name);
        let before = self.entries.len();
        self.entries.retain(|k, _| normalize_property(k) != key);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Canonical property key: lowercase with `-` and `_` removed, so
/// `flexDirection`, `flex-direction` and `flex_direction` compare equal.
pub fn normalize_property(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Parsing
// =============================================================================

/// Extraction result: the map plus every declaration that was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStyle {
    pub map: StyleMap,
    pub skipped: Vec<StyleDiagnostic>,
}

/// Parse a microformat string.
///
/// Blank candidates (such as the one after a trailing `;`) are ignored
/// without a diagnostic.
pub fn parse_style(text: &str) -> ParsedStyle {
    let mut parsed = ParsedStyle::default();

    for candidate in text.split(';') {
        let parts: Vec<&str> = candidate.split(':').collect();
        match parts.as_slice() {
            [name, value] => {
                let value = value.trim();
                parsed.map.insert(name.trim(), StyleValue::parse(value));
            }
            _ if candidate.trim().is_empty() => {}
            _ => parsed.skipped.push(StyleDiagnostic::MalformedDeclaration {
                declaration: candidate.trim().to_string(),
                colons: parts.len() - 1,
            }),
        }
    }

    parsed
}

/// Read and parse the style attribute of `node`.
///
/// A missing attribute (or a non-element node) yields an empty map.
pub fn extract_style(doc: &Document, node: NodeId, attribute: &str) -> ParsedStyle {
    doc.attribute(node, attribute)
        .map(parse_style)
        .unwrap_or_default()
}

/// Numeric-string coercion.
///
/// Accepts optionally signed decimals with exponent, `Infinity`, unsigned
/// `0x`/`0o`/`0b` integers, and blank text (which reads as `0`). Anything
/// else, including `NaN` and unit suffixes like `10px`, is not a number.
pub fn coerce_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'-' => (-1.0, &text[1..]),
        b'+' => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    if unsigned.len() == text.len() {
        if let Some(value) = radix_integer(unsigned) {
            return Some(value);
        }
    }

    let decimal_chars = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    let leads_with_digit = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    if !decimal_chars || !leads_with_digit {
        return None;
    }

    unsigned.parse::<f64>().ok().map(|v| sign * v)
}

fn radix_integer(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2)? {
        "0x" | "0X" => (16, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0b" | "0B" => (2, &text[2..]),
        _ => return None,
    };
    u64::from_str_radix(digits, radix).ok().map(|v| v as f64)
}
