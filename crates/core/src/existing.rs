use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const BROWN_ORIGINAL: &str = "brown_original";
pub const COLOR_ORIGINAL: &str = "color_original";
pub const TYPE_ORIGINAL: &str = "type_original";

/// Previously stored raw values for a record, keyed by column name.
///
/// Consulted read-only when a field cannot be recovered from the OCR text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExistingValues(BTreeMap<String, String>);

impl ExistingValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Stored value trimmed, whitespace-collapsed and upper-cased.
    /// Blank values are treated as missing.
    pub fn normalized(&self, key: &str) -> Option<String> {
        let v = self
            .get(key)?
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        (!v.is_empty()).then_some(v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExistingValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
