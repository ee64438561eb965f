//! Select filter options.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

/// The options of a select filter, value to label, in declaration order.
///
/// Serialized as a JSON object; decoding keeps the order the keys appear in.
///
/// # Example
///
/// ```
/// use datatable_lib::config::FilterOptions;
///
/// let options: FilterOptions =
///     serde_json::from_str(r#"{ "training": "Training", "staging": "Staging" }"#).unwrap();
///
/// let values: Vec<&str> = options.iter().map(|(value, _)| value).collect();
/// assert_eq!(values, ["training", "staging"]);
/// assert_eq!(options.label("staging"), Some("Staging"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    entries: Vec<(String, String)>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option at the end, or relabels it in place if the value is
    /// already present.
    pub fn insert(&mut self, value: impl Into<String>, label: impl Into<String>) {
        let value = value.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(v, _)| *v == value) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((value, label)),
        }
    }

    /// Returns `true` if `value` is one of the options.
    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|(v, _)| v == value)
    }

    /// Returns the label of an option.
    pub fn label(&self, value: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, label)| label.as_str())
    }

    /// Iterates `(value, label)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(v, l)| (v.as_str(), l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FilterOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (value, label) in &self.entries {
            map.serialize_entry(value, label)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FilterOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FilterOptionsVisitor)
    }
}

struct FilterOptionsVisitor;

impl<'de> Visitor<'de> for FilterOptionsVisitor {
    type Value = FilterOptions;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of select option values to labels")
    }

    fn visit_map<M>(self, mut map: M) -> Result<FilterOptions, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut options = FilterOptions::new();
        while let Some((value, label)) = map.next_entry::<String, String>()? {
            options.insert(value, label);
        }
        Ok(options)
    }
}
