//! Narrow, case-insensitive decoding of provider replies.
//!
//! Replies are parsed into a [`serde_json::Value`] first and then read field by
//! field through [`Fields`], so a bad payload always ends in a [`DecodeError`]
//! naming the offending field instead of a generic deserializer failure.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("expected a JSON object at `{0}`")]
    NotAnObject(String),

    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}` is not {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

/// A typed shape that can be read out of a JSON object.
pub trait DecodeShape: Sized {
    fn decode_fields(fields: &Fields<'_>) -> Result<Self, DecodeError>;
}

/// Parses `text` as JSON and maps the top-level object onto `T`.
pub fn decode<T: DecodeShape>(text: &str) -> Result<T, DecodeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    let fields = Fields::at(&value, String::new())?;

    T::decode_fields(&fields)
}

/// Read-only view over one JSON object.
///
/// Every accessor takes a list of accepted spellings; the first one is the
/// canonical name used in error paths. Exact key matches win over
/// case-insensitive ones. JSON `null` counts as absent.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    fn at(value: &'a Value, path: String) -> Result<Self, DecodeError> {
        match value {
            Value::Object(object) => Ok(Self { object, path }),
            _ => Err(DecodeError::NotAnObject(if path.is_empty() {
                "$".to_string()
            } else {
                path
            })),
        }
    }

    fn field_path(&self, names: &[&str]) -> String {
        let name = names.first().copied().unwrap_or_default();
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    fn lookup(&self, names: &[&str]) -> Option<&'a Value> {
        let object = self.object;

        names
            .iter()
            .find_map(|name| object.get(*name))
            .or_else(|| {
                names.iter().find_map(|name| {
                    object
                        .iter()
                        .find(|(key, _)| key.eq_ignore_ascii_case(name))
                        .map(|(_, value)| value)
                })
            })
            .filter(|value| !value.is_null())
    }

    fn require(&self, names: &[&str]) -> Result<&'a Value, DecodeError> {
        self.lookup(names)
            .ok_or_else(|| DecodeError::MissingField(self.field_path(names)))
    }

    pub fn string(&self, names: &[&str]) -> Result<String, DecodeError> {
        self.require(names)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DecodeError::WrongType {
                field: self.field_path(names),
                expected: "a string",
            })
    }

    pub fn number(&self, names: &[&str]) -> Result<f64, DecodeError> {
        self.require(names)?
            .as_f64()
            .ok_or_else(|| DecodeError::WrongType {
                field: self.field_path(names),
                expected: "a number",
            })
    }

    /// Optional unsigned integer. Integral floats such as `4.0` are accepted.
    pub fn optional_u32(&self, names: &[&str]) -> Result<Option<u32>, DecodeError> {
        let Some(value) = self.lookup(names) else {
            return Ok(None);
        };

        let integer = value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
                .map(|n| n as u64)
        });

        integer
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| DecodeError::WrongType {
                field: self.field_path(names),
                expected: "a non-negative integer",
            })
    }

    pub fn string_list(&self, names: &[&str]) -> Result<Vec<String>, DecodeError> {
        let field = self.field_path(names);

        self.array(names)?
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| DecodeError::WrongType {
                        field: format!("{field}[{index}]"),
                        expected: "a string",
                    })
            })
            .collect()
    }

    pub fn object(&self, names: &[&str]) -> Result<Fields<'a>, DecodeError> {
        Fields::at(self.require(names)?, self.field_path(names))
    }

    pub fn objects(&self, names: &[&str]) -> Result<Vec<Fields<'a>>, DecodeError> {
        let field = self.field_path(names);

        self.array(names)?
            .iter()
            .enumerate()
            .map(|(index, value)| Fields::at(value, format!("{field}[{index}]")))
            .collect()
    }

    fn array(&self, names: &[&str]) -> Result<&'a Vec<Value>, DecodeError> {
        self.require(names)?
            .as_array()
            .ok_or_else(|| DecodeError::WrongType {
                field: self.field_path(names),
                expected: "an array",
            })
    }
}
