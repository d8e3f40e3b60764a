//! Header multimap used inside log records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Header name to ordered values.
///
/// Names are stored in canonical MIME form (`content-type` becomes
/// `Content-Type`), so lookups are case-insensitive. Names keep the order in
/// which they were first seen and values keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderValues {
    entries: IndexMap<String, Vec<String>>,
}

impl HeaderValues {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under `name`.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.entries
            .entry(canonical_header_name(name))
            .or_default()
            .push(value.into());
    }

    /// Returns all values recorded for `name`.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .get(&canonical_header_name(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the first value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// Returns true if `name` has at least one value.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&canonical_header_name(name))
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over names and their values in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderValues
where
    N: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name.as_ref(), value);
        }
        headers
    }
}

/// Canonical MIME form of a header name.
///
/// The first character and every character following a hyphen are
/// upper-cased, the rest lower-cased. Names containing characters outside the
/// HTTP token set are returned unchanged.
pub fn canonical_header_name(name: &str) -> String {
    if !name.bytes().all(is_token_byte) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
                | b'`' | b'|' | b'~'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_lowercase_names() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("x-test"), "X-Test");
        assert_eq!(canonical_header_name("HOST"), "Host");
    }

    #[test]
    fn leaves_invalid_names_untouched() {
        assert_eq!(canonical_header_name("bad header"), "bad header");
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let mut headers = HeaderValues::new();
        headers.append("x-test", "a");
        headers.append("X-TEST", "b");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get_all("X-Test"), ["a", "b"]);
        assert_eq!(headers.get("x-test"), Some("a"));
        assert!(headers.contains("X-test"));
    }

    #[test]
    fn preserves_first_seen_name_order() {
        let headers: HeaderValues = [("b-header", "1"), ("a-header", "2"), ("b-header", "3")]
            .into_iter()
            .collect();

        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["B-Header", "A-Header"]);
    }

    #[test]
    fn serializes_as_map_of_arrays() {
        let headers: HeaderValues = [("x-test", "a")].into_iter().collect();
        let json = serde_json::to_string(&headers).unwrap();

        assert_eq!(json, r#"{"X-Test":["a"]}"#);
    }

    #[test]
    fn missing_header_is_empty() {
        let headers = HeaderValues::new();
        assert!(headers.get_all("accept").is_empty());
        assert!(headers.get("accept").is_none());
    }
}
