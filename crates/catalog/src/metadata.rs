use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopforge_core::ValueObject;

/// One key/value entry in a metadata input list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
}

impl MetadataItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered string map carried by catalog rows.
///
/// Public and private metadata are two independent instances of this type;
/// input lists upsert into the map, never wipe it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Write every item into the map, overwriting keys that already exist and
    /// leaving all other keys untouched.
    pub fn upsert(&mut self, items: &[MetadataItem]) {
        for item in items {
            self.0.insert(item.key.clone(), item.value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for Metadata {}

impl FromIterator<(String, String)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_overwrites_existing_and_keeps_others() {
        let mut metadata = Metadata::new();
        metadata.set("color", "red");
        metadata.set("origin", "PL");

        metadata.upsert(&[
            MetadataItem::new("color", "blue"),
            MetadataItem::new("season", "summer"),
        ]);

        assert_eq!(metadata.get("color"), Some("blue"));
        assert_eq!(metadata.get("origin"), Some("PL"));
        assert_eq!(metadata.get("season"), Some("summer"));
        assert_eq!(metadata.len(), 3);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut metadata = Metadata::new();
        metadata.set("b", "2");
        metadata.set("a", "1");

        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn empty_upsert_is_noop() {
        let mut metadata = Metadata::new();
        metadata.set("k", "v");
        metadata.upsert(&[]);
        assert_eq!(metadata.len(), 1);
    }
}
