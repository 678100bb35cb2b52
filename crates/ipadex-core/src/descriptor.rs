//! Typed view over an application's `Info.plist`.

use std::io::Cursor;

use plist::{Dictionary, Value};
use thiserror::Error;

/// Why a descriptor could not be decoded.
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The bytes are not a binary or XML property list.
    #[error("Malformed property list: {0}")]
    Malformed(#[from] plist::Error),

    /// The property list decoded, but its root is not a dictionary.
    #[error("Property list root is not a dictionary")]
    NotADictionary,
}

/// Decoded application descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor(Dictionary);

impl Descriptor {
    /// Decode descriptor bytes; the encoding is detected automatically.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] if the bytes cannot be decoded or the
    /// root value is not a dictionary.
    pub fn parse(bytes: &[u8]) -> Result<Self, DescriptorError> {
        Value::from_reader(Cursor::new(bytes))?
            .into_dictionary()
            .map(Self)
            .ok_or(DescriptorError::NotADictionary)
    }

    /// Raw value for a top-level key.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Walk nested dictionaries, e.g. `["CFBundleIcons", "CFBundlePrimaryIcon"]`.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter().try_fold(self.value(first)?, |value, key| {
            value.as_dictionary()?.get(key)
        })
    }

    /// String value for a top-level key.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_string)
    }

    /// String value for a top-level key, treating `""` as absent.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.string(key).filter(|s| !s.is_empty())
    }

    /// Integers under a key. Accepts an array or a single value, and
    /// numeric strings such as `"1"`.
    pub fn integers(&self, key: &str) -> Vec<i64> {
        match self.value(key) {
            Some(Value::Array(items)) => items.iter().filter_map(as_integer).collect(),
            Some(other) => as_integer(other).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

impl From<Dictionary> for Descriptor {
    fn from(dict: Dictionary) -> Self {
        Self(dict)
    }
}

/// Strings held by `value`: every string element of an array, or the value
/// itself if it is a single string.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_string)
            .map(str::to_string)
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        other => other.as_signed_integer(),
    }
}
