//! JSON codec used for request and response bodies.
//!
//! Bodies are encoded through an intermediate [`serde_json::Value`] so that
//! the configured [`JsonSettings`] can be applied regardless of how the
//! value's `Serialize` impl was written. Dates and enums rely on their serde
//! representation: `chrono` dates encode as ISO-8601 strings and unit enum
//! variants encode as their names.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, ser};
use serde_json::{Map, Value};

use crate::field_names::FieldMatching;
use crate::{HttpClientError, Result};

/// How object keys are written when serializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropertyNaming {
    /// Rewrite keys to camelCase (`due_date` becomes `dueDate`).
    #[default]
    CamelCase,
    /// Keep keys exactly as the `Serialize` impl produced them.
    AsIs,
}

/// Serialization policy applied by a [`JsonCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSettings {
    /// Key naming for serialized objects.
    pub property_naming: PropertyNaming,
    /// Drop object members whose value is `null`.
    pub omit_null_properties: bool,
}

impl Default for JsonSettings {
    fn default() -> Self {
        Self {
            property_naming: PropertyNaming::CamelCase,
            omit_null_properties: true,
        }
    }
}

impl JsonSettings {
    /// Settings that leave the serde output untouched.
    pub fn verbatim() -> Self {
        Self {
            property_naming: PropertyNaming::AsIs,
            omit_null_properties: false,
        }
    }

    /// Set the key naming policy.
    pub fn property_naming(mut self, naming: PropertyNaming) -> Self {
        self.property_naming = naming;
        self
    }

    /// Enable or disable dropping of `null` members.
    pub fn omit_null_properties(mut self, omit: bool) -> Self {
        self.omit_null_properties = omit;
        self
    }
}

/// JSON encoder/decoder configured with [`JsonSettings`].
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    settings: JsonSettings,
}

impl JsonCodec {
    /// Create a codec with the given settings.
    pub fn new(settings: JsonSettings) -> Self {
        Self { settings }
    }

    /// Get the codec settings.
    pub fn settings(&self) -> &JsonSettings {
        &self.settings
    }

    /// Convert a value to a JSON tree with the settings applied.
    ///
    /// Fails when two keys of one object end up with the same camelCase name.
    pub fn to_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value> {
        let value = serde_json::to_value(value).map_err(HttpClientError::Serialization)?;
        self.apply(value).map_err(HttpClientError::Serialization)
    }

    /// Serialize a value to JSON text.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let value = self.to_value(value)?;
        serde_json::to_string(&value).map_err(HttpClientError::Serialization)
    }

    /// Deserialize JSON text.
    ///
    /// Empty text and the `null` literal both yield `None`.
    pub fn deserialize<T: DeserializeOwned>(&self, json: &str) -> Result<Option<T>> {
        self.deserialize_slice(json.as_bytes())
    }

    /// Deserialize UTF-8 encoded JSON bytes.
    ///
    /// With [`PropertyNaming::CamelCase`], struct fields and enum variants
    /// are matched regardless of case convention, so `dueDate` fills a
    /// `due_date` field.
    pub fn deserialize_slice<T: DeserializeOwned>(&self, json: &[u8]) -> Result<Option<T>> {
        if json.trim_ascii().is_empty() {
            return Ok(None);
        }
        match self.settings.property_naming {
            PropertyNaming::AsIs => serde_json::from_slice(json),
            PropertyNaming::CamelCase => serde_json::from_slice::<Value>(json)
                .and_then(|value| Option::<T>::deserialize(FieldMatching(value))),
        }
        .map_err(HttpClientError::Deserialization)
    }

    fn apply(&self, value: Value) -> std::result::Result<Value, serde_json::Error> {
        match value {
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, value) in map {
                    if self.settings.omit_null_properties && value.is_null() {
                        continue;
                    }
                    let key = match self.settings.property_naming {
                        PropertyNaming::CamelCase => to_camel_case(&key),
                        PropertyNaming::AsIs => key,
                    };
                    if out.contains_key(&key) {
                        return Err(ser::Error::custom(format!(
                            "duplicate property \"{key}\" after renaming"
                        )));
                    }
                    let value = self.apply(value)?;
                    out.insert(key, value);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => items
                .into_iter()
                .map(|v| self.apply(v))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other),
        }
    }
}

/// Convert a snake_case or PascalCase key to camelCase.
///
/// Leading underscores are kept. A leading run of capitals is lowercased up
/// to the start of the next word, so `URLValue` becomes `urlValue`.
fn to_camel_case(key: &str) -> String {
    let body = key.trim_start_matches('_');
    let mut out = String::with_capacity(key.len());
    out.push_str(&key[..key.len() - body.len()]);

    let mut words = body.split('_').filter(|w| !w.is_empty());
    if let Some(first) = words.next() {
        out.push_str(&lower_leading(first));
    }
    for word in words {
        let mut chars = word.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

fn lower_leading(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut lowered = 0;
    for (i, c) in chars.iter().enumerate() {
        if i == 1 && !c.is_uppercase() {
            break;
        }
        if i > 0 && chars.get(i + 1).is_some_and(|next| !next.is_uppercase()) {
            break;
        }
        lowered = i + 1;
    }

    chars[..lowered]
        .iter()
        .flat_map(|c| c.to_lowercase())
        .chain(chars[lowered..].iter().copied())
        .collect()
}
