//! Structured key/value context attached to output views.

use std::fmt;
use std::sync::Arc;

/// A value carried in structured context.
///
/// Values are kept as `Display` objects and only turned into text when a
/// line is rendered.
pub type Value = Arc<dyn fmt::Display + Send + Sync>;

/// One `key=value` pair.
#[derive(Clone)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
}

impl fmt::Debug for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Insertion-ordered key/value pairs. Duplicate keys are kept, not merged.
#[derive(Clone, Debug, Default)]
pub struct KeyValues(Vec<KeyValue>);

impl KeyValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, builder style.
    pub fn with<V>(mut self, key: impl Into<String>, value: V) -> Self
    where
        V: fmt::Display + Send + Sync + 'static,
    {
        self.push(key, value);
        self
    }

    pub fn push<V>(&mut self, key: impl Into<String>, value: V)
    where
        V: fmt::Display + Send + Sync + 'static,
    {
        self.0.push(KeyValue {
            key: key.into(),
            value: Arc::new(value),
        });
    }

    /// A new sequence holding `self` followed by `other`. Neither input changes.
    pub fn concat(&self, other: &KeyValues) -> KeyValues {
        let mut pairs = Vec::with_capacity(self.0.len() + other.0.len());
        pairs.extend(self.0.iter().cloned());
        pairs.extend(other.0.iter().cloned());
        KeyValues(pairs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }

    /// Stringified pairs, mostly useful for assertions.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|kv| (kv.key.clone(), kv.value.to_string()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a KeyValues {
    type Item = &'a KeyValue;
    type IntoIter = std::slice::Iter<'a, KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build [`KeyValues`] from `key => value` pairs.
///
/// ```
/// use shellout::kv;
///
/// let values = kv!["cluster" => "east", "nodes" => 3];
/// assert_eq!(values.len(), 2);
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        $crate::output::KeyValues::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::output::KeyValues::new()$(.with($key, $value))+
    };
}

/// Render pairs as a line suffix: three spaces, then ` key=value` per pair.
///
/// Values containing a space or `=` are wrapped in double quotes. Embedded
/// quotes are not escaped.
pub fn format_key_values(values: &KeyValues) -> String {
    if values.is_empty() {
        return String::new();
    }
    let mut result = String::from("   ");
    for kv in values {
        let value = kv.value.to_string();
        if value.contains(' ') || value.contains('=') {
            result.push_str(&format!(" {}=\"{value}\"", kv.key));
        } else {
            result.push_str(&format!(" {}={value}", kv.key));
        }
    }
    result
}
