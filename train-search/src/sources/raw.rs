//! Untyped source rows.

use std::collections::HashMap;

/// A raw row from a schedule or timetable source: column name to cell text.
///
/// Column names are kept exactly as the source spells them; the per-source
/// schema decides which names matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Trimmed cell value, or `None` when the column is absent or blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First non-blank value among `aliases`, with the alias that supplied it.
    pub fn first_of<'a, 'b>(&'a self, aliases: &'b [String]) -> Option<(&'b str, &'a str)> {
        aliases
            .iter()
            .find_map(|alias| self.get(alias).map(|v| (alias.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
