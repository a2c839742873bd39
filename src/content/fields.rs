//! Partially loaded article fields

use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;

/// The fields of one article a caller asked for
///
/// A key is either present with a value (which may be empty) or absent.
/// Absence is meaningful: an article without `canonical_url` must not
/// produce an empty canonical link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fields {
    values: IndexMap<String, String>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Value of a field, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field names in the order they were requested
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Remove a field, returning its value
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.values.shift_remove(key)
    }

    pub fn slug(&self) -> Option<&str> {
        self.get("slug")
    }

    /// Raw markdown body
    pub fn content(&self) -> Option<&str> {
        self.get("content")
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    pub fn image(&self) -> Option<&str> {
        self.get("image")
    }

    pub fn canonical_url(&self) -> Option<&str> {
        self.get("canonical_url")
    }

    pub fn lang(&self) -> Option<&str> {
        self.get("lang")
    }

    /// Read a boolean-like field
    ///
    /// Absent, empty, `false`, `0`, `no` and `off` are false; any other
    /// value is true. Front-matter scalars arrive as strings, so a quoted
    /// `"false"` or a bare `no` counts as false here, unlike a plain
    /// non-empty-string truthiness check.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            None => false,
            Some(value) => {
                let value = value.trim();
                !(value.is_empty()
                    || ["false", "0", "no", "off"]
                        .iter()
                        .any(|f| value.eq_ignore_ascii_case(f)))
            }
        }
    }

    pub fn skip(&self) -> bool {
        self.flag("skip")
    }

    /// Sort key for date ordering
    pub fn date_key(&self) -> DateKey {
        match self.date() {
            Some(date) => DateKey::Present(date.to_string()),
            None => DateKey::Missing,
        }
    }
}

/// Total order over article dates
///
/// A missing date sorts below every present date. Present dates compare
/// as strings, which orders ISO-8601 dates chronologically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKey {
    Missing,
    Present(String),
}

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DateKey::Missing, DateKey::Missing) => Ordering::Equal,
            (DateKey::Missing, DateKey::Present(_)) => Ordering::Less,
            (DateKey::Present(_), DateKey::Missing) => Ordering::Greater,
            (DateKey::Present(a), DateKey::Present(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
