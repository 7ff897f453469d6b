//! Keyword routing between native field arguments and extension metadata.
//!
//! A field declaration is a bag of keyword arguments. Most of them belong to
//! the native field constructor (`default`, `max_length`, ...). A small,
//! closed set of names belongs to signatures instead; those are moved into the
//! `json_schema_extra` sub-record so the native constructor never sees them.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{trace, warn};

/// An ordered bag of keyword arguments.
pub type Kwargs = IndexMap<String, Value>;

/// Keyword names understood by signatures on top of the native arguments.
pub const FIELD_ARG_NAMES: [&str; 6] = [
    "desc",
    "prefix",
    "format",
    "is_image",
    "parser",
    FIELD_TYPE_KEY,
];

/// Reserved extension key carrying the field directionality.
pub const FIELD_TYPE_KEY: &str = "__dspy_field_type";

/// Native key holding the extension sub-record.
pub const EXTRA_KEY: &str = "json_schema_extra";

/// Native description argument, used as a fallback for `desc`.
pub const DESCRIPTION_KEY: &str = "description";

/// Build a [`Kwargs`] bag from `key => value` pairs.
///
/// Values go through `serde_json::json!`, so literals, arrays and nested
/// objects all work:
///
/// ```
/// use signature_fields::kwargs;
///
/// let bag = kwargs! { "desc" => "the question", "max_length" => 120 };
/// assert_eq!(bag.len(), 2);
/// ```
///
/// Each value must be a single token tree: a literal, an identifier, or a
/// bracketed, braced or parenthesized group. Negative numbers and compound
/// expressions such as `-1` or `config.limit` need parentheses:
///
/// ```
/// use signature_fields::kwargs;
///
/// let limit = 3;
/// let bag = kwargs! { "ge" => (-1), "le" => (limit * 2) };
/// assert_eq!(bag["ge"], -1);
/// assert_eq!(bag["le"], 6);
/// ```
#[macro_export]
macro_rules! kwargs {
    () => {
        $crate::Kwargs::new()
    };
    ($($key:expr => $value:tt),+ $(,)?) => {{
        let mut bag = $crate::Kwargs::new();
        $(
            bag.insert(::std::string::String::from($key), $crate::__private::json!($value));
        )+
        bag
    }};
}

/// Whether `key` belongs to the extension key set.
pub fn is_extension_key(key: &str) -> bool {
    FIELD_ARG_NAMES.contains(&key)
}

/// Split `kwargs` into native arguments plus a `json_schema_extra` record.
///
/// Extension keys move into the record unchanged; everything else stays at
/// the top level in its original order. When only the native `description` is
/// given it is copied into the record as `desc`. The record is always present
/// in the output, even when empty.
pub fn route_kwargs(kwargs: Kwargs) -> Kwargs {
    let mut native = Kwargs::with_capacity(kwargs.len() + 1);
    let mut routed = Map::new();
    let mut caller_extra = None;

    for (key, value) in kwargs {
        if is_extension_key(&key) {
            routed.insert(key, value);
        } else if key == EXTRA_KEY {
            caller_extra = Some(value);
        } else {
            native.insert(key, value);
        }
    }

    let mut extra = match caller_extra {
        Some(Value::Object(mut seeded)) => {
            seeded.extend(routed);
            seeded
        }
        Some(other) => {
            warn!(value = %other, "ignoring non-object json_schema_extra argument");
            routed
        }
        None => routed,
    };

    if !extra.contains_key("desc") {
        if let Some(description) = native.get(DESCRIPTION_KEY) {
            extra.insert("desc".to_string(), description.clone());
        }
    }

    trace!(
        native = native.len(),
        extra = extra.len(),
        "routed field keyword arguments"
    );

    native.insert(EXTRA_KEY.to_string(), Value::Object(extra));
    native
}
