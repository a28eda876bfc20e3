//! Insertion-ordered string metadata.

use indexmap::IndexMap;
use serde::Serialize;

/// Key/value metadata attached to an event or folded over an entry.
///
/// Keys keep the position of their first insertion. Inserting an existing
/// key replaces its value in place, so later writes win without reordering
/// the canonical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: IndexMap<String, String>,
}

impl Metadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Applies every field of `other` on top of `self`.
    pub fn merge_from(&mut self, other: &Self) {
        self.fields.extend(
            other
                .fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut metadata = Metadata::new();
        assert_eq!(metadata.insert("priority", "low"), None);
        metadata.insert("owner", "me");
        assert_eq!(metadata.insert("priority", "high"), Some("low".to_string()));

        let keys: Vec<_> = metadata.keys().collect();
        assert_eq!(keys, ["priority", "owner"]);
        assert_eq!(metadata.get("priority"), Some("high"));
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn merge_from_applies_later_values() {
        let mut state: Metadata = [("a", "1"), ("b", "2")].into_iter().collect();
        let update: Metadata = [("b", "3"), ("c", "4")].into_iter().collect();
        state.merge_from(&update);

        let fields: Vec<_> = state.iter().collect();
        assert_eq!(fields, [("a", "1"), ("b", "3"), ("c", "4")]);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let metadata: Metadata = [("z", "last"), ("a", "first")].into_iter().collect();
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"z":"last","a":"first"}"#);
    }

    #[test]
    fn repeated_key_in_source_keeps_first_position() {
        let metadata: Metadata = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        let fields: Vec<_> = metadata.iter().collect();
        assert_eq!(fields, [("a", "3"), ("b", "2")]);
    }

    #[test]
    fn missing_key_is_none() {
        let metadata = Metadata::new();
        assert!(metadata.is_empty());
        assert!(!metadata.contains_key("priority"));
    }
}
