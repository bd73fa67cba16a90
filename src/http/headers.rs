//! Ordered multi-map of HTTP headers.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// An insertion-ordered multi-map of header names to value lists.
///
/// Lookup is ASCII case-insensitive; stored names keep the spelling they
/// were appended with. Appending a value to an existing name extends that
/// name's value list in place, so iteration order reflects the order in
/// which names were first seen.
///
/// ## Example
///
/// ```rust
/// use wiretap::Headers;
///
/// let mut headers = Headers::new();
/// headers.append("Accept", "application/json");
/// headers.append("X-Tag", "a");
/// headers.append("x-tag", "b");
///
/// assert_eq!(headers.get("accept"), Some("application/json"));
/// assert_eq!(headers.get_all("X-Tag"), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Vec<String>)>,
}

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to the given header name.
    ///
    /// If the name is already present (case-insensitively), the value is
    /// pushed onto its list; otherwise a new entry is added at the end.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some((_, values)) = self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            values.push(value);
        } else {
            self.entries.push((name, vec![value]));
        }
    }

    /// Returns the first value for the given name, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// Returns all values for the given name, in insertion order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if the given name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Returns the number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no headers are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(n, values)| (n.as_str(), values.as_slice()))
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, values) in &self.entries {
            for value in values {
                writeln!(f, "{}: {}", name, value)?;
            }
        }
        Ok(())
    }
}
