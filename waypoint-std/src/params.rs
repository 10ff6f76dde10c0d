//! Decoding of navigation parameters.
//!
//! The router hands controllers raw `key=value` fragments; [`Params`] turns
//! them into a name -> value map. Values have `+` mapped to a space and are
//! percent-decoded. An empty value, or the literal `null`, means the
//! parameter is present but has no value.

use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use waypoint_core::NavigationRequest;

/// Decoded navigation parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, Option<String>>,
}

impl Params {
    /// Decode the parameters of a request.
    pub fn from_request(request: &NavigationRequest) -> Self {
        Self::from_fragments(&request.parameters)
    }

    /// Decode raw fragments. An empty first fragment means "no parameters".
    pub fn from_fragments<S: AsRef<str>>(fragments: &[S]) -> Self {
        let mut values = BTreeMap::new();
        if fragments.first().is_none_or(|f| f.as_ref().is_empty()) {
            return Self { values };
        }

        for fragment in fragments {
            let (name, raw) = fragment.as_ref().split_once('=').unwrap_or((fragment.as_ref(), ""));
            values.insert(decode(name), decode_value(raw));
        }
        Self { values }
    }

    /// The value of `name`, if present and not absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    /// Whether `name` appeared at all, with or without a value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Parameters with a value, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// Number of parameter names seen.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no parameter was given.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameters with a value as a JSON object, for template contexts.
    pub fn to_json(&self) -> serde_json::Value {
        self.iter()
            .map(|(k, v)| (k.to_owned(), serde_json::Value::String(v.to_owned())))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn decode_value(raw: &str) -> Option<String> {
    match decode(raw) {
        v if v.is_empty() || v == "null" => None,
        v => Some(v),
    }
}
