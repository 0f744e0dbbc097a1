//! Schema-less data records.
//!
//! A [`Record`] is one item of a dataset: a mapping from field name to a
//! [`FieldValue`]. Records have no fixed schema; fields are looked up by name
//! at search and render time, and a missing field is simply `None`.
//!
//! # Examples
//!
//! ```rust
//! use datalist_widgets::record::{FieldValue, Record};
//!
//! let record = Record::new()
//!     .with("name", "Widget")
//!     .with("price", 12)
//!     .with("discontinued", FieldValue::Null);
//!
//! assert_eq!(record.text("name").as_deref(), Some("Widget"));
//! assert_eq!(record.text("price").as_deref(), Some("12"));
//! assert_eq!(record.text("discontinued"), None);
//! assert_eq!(record.text("missing"), None);
//! ```

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// The value of a single record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A string value. Booleans and nested JSON are stored here as text.
    Text(String),
    /// A JSON number, kept in its original representation.
    Number(Number),
    /// An explicit null.
    Null,
}

impl FieldValue {
    /// Returns true for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Converts a JSON value into a field value.
    ///
    /// Strings, numbers and null map directly. Booleans become the text
    /// `"true"`/`"false"`; arrays and objects become their compact JSON text.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => FieldValue::Number(n),
            Value::Bool(b) => FieldValue::Text(b.to_string()),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => match n.as_f64() {
                // Integral floats read like integers: `1.0` shows as `1`.
                Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < 9.007_199_254_740_992e15 => {
                    write!(f, "{}", x as i64)
                }
                _ => write!(f, "{}", n),
            },
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(i64::from(value).into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<f64> for FieldValue {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Null)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// One schema-less item of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field (builder pattern).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the raw value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Looks a field up by exact name, falling back to an ASCII
    /// case-insensitive match.
    ///
    /// HTML parsers lower-case attribute names, so a binding written as
    /// `item.firstName` reaches us as `firstname`.
    pub fn get_loose(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).or_else(|| {
            self.fields
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(field))
                .map(|(_, value)| value)
        })
    }

    /// Returns the stringified value of a field.
    ///
    /// Missing fields and `Null` values yield `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            FieldValue::Null => None,
            value => Some(value.to_string()),
        }
    }

    /// Iterates over fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a record from a JSON object. Returns `None` for anything else.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from(map)),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(k, v)| (k, FieldValue::from_json(v)))
            .collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { fields }
    }
}
