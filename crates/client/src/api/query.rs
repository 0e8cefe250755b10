//! Query-parameter mapping forwarded verbatim to the backend.
//!
//! The backend owns the parameter vocabulary (`client_ips`, `subnet`,
//! `date_from`, `date_to`, `sort_by`, `sort_order`, `limit`, `offset`,
//! `domain_regex`, ...); this layer never inspects keys or values. Pairs
//! keep insertion order and array values encode as repeated keys, which is
//! exactly what the transport serializer puts on the wire.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A single query-parameter value: one scalar, or a list that encodes as
/// the same key repeated once per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// One `key=value` pair.
    Single(String),
    /// `key=v1&key=v2&...` in element order.
    Many(Vec<String>),
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for QueryValue {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Ordered multimap of request query parameters.
///
/// Supplied per call and passed through to the transport unmodified; no
/// validation, defaulting, or normalization happens on this side. Missing
/// or invalid parameters are the backend's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Create an empty parameter mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Chaining form of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Number of entries (array values count once).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// Serializes as a sequence of `(key, value)` pairs with arrays flattened
/// into repeated keys, the shape the transport's query-string serializer
/// consumes.
impl Serialize for QueryParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        for (key, value) in &self.pairs {
            match value {
                QueryValue::Single(v) => seq.serialize_element(&(key, v))?,
                QueryValue::Many(vs) => {
                    for v in vs {
                        seq.serialize_element(&(key, v))?;
                    }
                }
            }
        }
        seq.end()
    }
}
