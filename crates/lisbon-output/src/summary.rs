//! Report summary.

use serde::Serialize;

/// Ordered `label -> value` pairs printed on the report's first page.
///
/// Entries keep their insertion order. Inserting an existing label replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SummaryRecord {
    entries: Vec<(String, String)>,
}

impl SummaryRecord {
    /// Create an empty summary.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the value of `label`.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((label, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(label, value);
        self
    }

    /// Value of `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the summary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `label: value` line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect()
    }
}
