use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Re-encoding applied to every string leaf of an outgoing request
///
/// Rust strings are already UTF-8, so the default is a no-op. `Latin1`
/// reproduces the legacy behavior of treating each byte as an ISO-8859-1
/// code point and encoding it again; only use it when the input is known to
/// carry Latin-1 bytes smuggled through `char`s.
#[derive(Clone, Default)]
pub enum TextNormalizer {
    /// Leave strings untouched
    #[default]
    Identity,
    /// Map every byte to the code point of the same value
    Latin1,
    /// Caller-supplied conversion
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl TextNormalizer {
    /// Wrap a closure as a custom normalizer
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        TextNormalizer::Custom(Arc::new(f))
    }

    /// Normalize a single string
    pub fn normalize_str(&self, value: &str) -> String {
        match self {
            TextNormalizer::Identity => value.to_string(),
            TextNormalizer::Latin1 => value.bytes().map(char::from).collect(),
            TextNormalizer::Custom(f) => f(value),
        }
    }

    /// Rewrite every string leaf of `value` in place
    ///
    /// Objects and arrays are walked to any depth. Object keys, numbers,
    /// booleans and nulls are left as they are.
    pub fn apply(&self, value: &mut Value) {
        if matches!(self, TextNormalizer::Identity) {
            return;
        }
        match value {
            Value::String(s) => *s = self.normalize_str(s),
            Value::Array(items) => items.iter_mut().for_each(|item| self.apply(item)),
            Value::Object(map) => map.values_mut().for_each(|item| self.apply(item)),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextNormalizer::Identity => f.write_str("Identity"),
            TextNormalizer::Latin1 => f.write_str("Latin1"),
            TextNormalizer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
