use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single flat record: an insertion-ordered mapping from field name to a
/// scalar value stored as opaque text.
///
/// Values keep no type information on purpose - storing everything as text is
/// what lets the query side compare numbers, booleans, and strings through
/// one fuzzy string-similarity function. Field order is observable: it drives
/// filter extraction (first matching field wins) and projection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord {
    fields: IndexMap<String, String>,
}

impl FlatRecord {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, overwriting any previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// (name, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reduce the record to the given fields, omitting any that are absent.
    #[must_use]
    pub fn project(&self, fields: &[&str]) -> FlatRecord {
        let mut out = FlatRecord::new();
        for &field in fields {
            if let Some(value) = self.get(field) {
                out.insert(field, value);
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
