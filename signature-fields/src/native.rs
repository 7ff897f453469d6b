//! Native schema field construction.
//!
//! `FieldInfo` is the new-form field descriptor. It understands the usual
//! schema constraints (`default`, `max_length`, `pattern`, ...) as typed
//! attributes and carries the extension sub-record produced by
//! [`route_kwargs`](crate::kwargs::route_kwargs) untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::error::{FieldsError, Result};
use crate::kwargs::{Kwargs, EXTRA_KEY, FIELD_TYPE_KEY};
use crate::types::FieldKind;

/// A schema field descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub le: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frozen: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<bool>,
    /// Arguments this constructor has no typed slot for, kept verbatim.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub unrecognized: Map<String, Value>,
    /// Extension metadata; see [`FIELD_ARG_NAMES`](crate::kwargs::FIELD_ARG_NAMES).
    #[serde(default)]
    pub json_schema_extra: Map<String, Value>,
}

impl FieldInfo {
    /// Build a descriptor from native keyword arguments.
    ///
    /// Expects a bag already passed through the keyword router, but any bag
    /// is accepted. Fails on the first argument with the wrong shape.
    pub fn from_kwargs(kwargs: Kwargs) -> Result<Self> {
        let mut info = FieldInfo::default();

        for (key, value) in kwargs {
            match key.as_str() {
                "default" => info.default = Some(value),
                "alias" => info.alias = Some(expect_string(&key, value)?),
                "title" => info.title = Some(expect_string(&key, value)?),
                "description" => info.description = Some(expect_string(&key, value)?),
                "examples" => match value {
                    Value::Array(items) => info.examples = Some(items),
                    _ => return Err(FieldsError::invalid_argument(&key, "expected an array")),
                },
                "gt" => info.gt = Some(expect_number(&key, value)?),
                "ge" => info.ge = Some(expect_number(&key, value)?),
                "lt" => info.lt = Some(expect_number(&key, value)?),
                "le" => info.le = Some(expect_number(&key, value)?),
                "multiple_of" => info.multiple_of = Some(expect_number(&key, value)?),
                "min_length" => info.min_length = Some(expect_length(&key, &value)?),
                "max_length" => info.max_length = Some(expect_length(&key, &value)?),
                "pattern" => {
                    let pattern = expect_string(&key, value)?;
                    Regex::new(&pattern)?;
                    info.pattern = Some(pattern);
                }
                "frozen" => info.frozen = Some(expect_bool(&key, &value)?),
                "exclude" => info.exclude = Some(expect_bool(&key, &value)?),
                EXTRA_KEY => match value {
                    Value::Object(extra) => info.json_schema_extra = extra,
                    _ => return Err(FieldsError::invalid_argument(&key, "expected an object")),
                },
                _ => {
                    warn!(arg = %key, "unrecognized field argument kept verbatim");
                    info.unrecognized.insert(key, value);
                }
            }
        }

        if let (Some(min), Some(max)) = (info.min_length, info.max_length) {
            if min > max {
                return Err(FieldsError::invalid_argument(
                    "min_length",
                    format!("{min} exceeds max_length {max}"),
                ));
            }
        }

        Ok(info)
    }

    /// The extension sub-record.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.json_schema_extra
    }

    /// Mutable access to the extension sub-record.
    pub fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.json_schema_extra
    }

    /// Directionality read from the extra record, if it holds a known marker.
    pub fn kind(&self) -> Option<FieldKind> {
        self.extra_str(FIELD_TYPE_KEY)
            .and_then(|marker| marker.parse().ok())
    }

    /// The `prefix` extension value, if it is a string.
    pub fn prefix(&self) -> Option<&str> {
        self.extra_str("prefix")
    }

    /// The `desc` extension value, if it is a string.
    pub fn desc(&self) -> Option<&str> {
        self.extra_str("desc")
    }

    fn extra_str(&self, key: &str) -> Option<&str> {
        self.json_schema_extra.get(key).and_then(Value::as_str)
    }
}

fn expect_string(arg: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(FieldsError::invalid_argument(arg, "expected a string")),
    }
}

fn expect_number(arg: &str, value: Value) -> Result<Number> {
    match value {
        Value::Number(n) => Ok(n),
        _ => Err(FieldsError::invalid_argument(arg, "expected a number")),
    }
}

fn expect_length(arg: &str, value: &Value) -> Result<u64> {
    value
        .as_u64()
        .ok_or_else(|| FieldsError::invalid_argument(arg, "expected a non-negative integer"))
}

fn expect_bool(arg: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| FieldsError::invalid_argument(arg, "expected a boolean"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kwargs;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn typed_native_arguments() {
        let info = FieldInfo::from_kwargs(kwargs! {
            "default" => [1, 2],
            "title" => "Count",
            "ge" => 0,
            "lt" => 10.5,
            "min_length" => 1,
            "max_length" => 4,
            "pattern" => "^[a-z]+$",
            "frozen" => true,
        })
        .unwrap();

        assert_eq!(info.default, Some(json!([1, 2])));
        assert_eq!(info.title.as_deref(), Some("Count"));
        assert_eq!(info.ge, Some(Number::from(0)));
        assert_eq!(info.lt.as_ref().and_then(Number::as_f64), Some(10.5));
        assert_eq!(info.min_length, Some(1));
        assert_eq!(info.max_length, Some(4));
        assert_eq!(info.pattern.as_deref(), Some("^[a-z]+$"));
        assert_eq!(info.frozen, Some(true));
        assert!(info.json_schema_extra.is_empty());
    }

    #[test]
    fn rejects_wrong_shapes() {
        let err = FieldInfo::from_kwargs(kwargs! { "max_length" => "ten" }).unwrap_err();
        assert!(matches!(err, FieldsError::InvalidArgument { ref arg, .. } if arg == "max_length"));

        let err = FieldInfo::from_kwargs(kwargs! { "min_length" => (-1) }).unwrap_err();
        assert!(matches!(err, FieldsError::InvalidArgument { ref arg, .. } if arg == "min_length"));

        let err = FieldInfo::from_kwargs(kwargs! { "title" => 3 }).unwrap_err();
        assert!(matches!(err, FieldsError::InvalidArgument { ref arg, .. } if arg == "title"));

        let err = FieldInfo::from_kwargs(kwargs! { "json_schema_extra" => [1] }).unwrap_err();
        assert!(matches!(err, FieldsError::InvalidArgument { ref arg, .. } if arg == EXTRA_KEY));
    }

    #[test]
    fn rejects_inverted_length_bounds() {
        let err = FieldInfo::from_kwargs(kwargs! { "min_length" => 5, "max_length" => 2 })
            .unwrap_err();
        assert!(err.to_string().contains("exceeds max_length"));
    }

    #[test]
    fn rejects_bad_pattern() {
        let err = FieldInfo::from_kwargs(kwargs! { "pattern" => "([a-z" }).unwrap_err();
        assert!(matches!(err, FieldsError::InvalidPattern(_)));
    }

    #[test]
    #[traced_test]
    fn unrecognized_arguments_are_kept() {
        let info = FieldInfo::from_kwargs(kwargs! { "units" => "cm" }).unwrap();
        assert_eq!(info.unrecognized.get("units"), Some(&json!("cm")));
        assert!(logs_contain("unrecognized field argument"));
    }

    #[test]
    fn extra_accessors() {
        let info = FieldInfo::from_kwargs(kwargs! {
            "json_schema_extra" => { "__dspy_field_type": "output", "prefix": "Answer:", "desc": 7 },
        })
        .unwrap();

        assert_eq!(info.kind(), Some(FieldKind::Output));
        assert_eq!(info.prefix(), Some("Answer:"));
        assert_eq!(info.desc(), None);
    }
}
