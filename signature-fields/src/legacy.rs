//! Legacy field model.
//!
//! Before fields carried their metadata in `json_schema_extra`, a field was a
//! small value with a prefix, a description, an optional format and an image
//! flag. `LegacyField` keeps that shape for code that still consumes it, and
//! [`legacy_from_new`] rebuilds one from a new-form [`FieldInfo`].
//!
//! A legacy field has a two-phase lifecycle. It is constructed with possibly
//! missing `prefix` and `desc`, then the owning signature calls
//! [`LegacyField::finalize`] once the field name and its inferred label are
//! known. Finalizing only fills values that are still unset.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FieldsError, Result};
use crate::kwargs::FIELD_TYPE_KEY;
use crate::native::FieldInfo;
use crate::types::FieldKind;

/// Where a legacy field is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    #[default]
    Unfinalized,
    Finalized,
}

/// A field in the legacy convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyField {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
    #[serde(default)]
    pub is_image: bool,
    kind: FieldKind,
    #[serde(default)]
    state: FieldState,
}

impl LegacyField {
    /// Create a field storing every value as given.
    pub fn new(
        kind: FieldKind,
        prefix: Option<String>,
        desc: Option<String>,
        format: Option<Value>,
        is_image: bool,
    ) -> Self {
        Self {
            prefix,
            desc,
            format,
            is_image,
            kind,
            state: FieldState::Unfinalized,
        }
    }

    /// An input field with nothing set.
    pub fn input() -> Self {
        Self::new(FieldKind::Input, None, None, None, false)
    }

    /// An output field with nothing set.
    pub fn output() -> Self {
        Self::new(FieldKind::Output, None, None, None, false)
    }

    /// Set an explicit prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set an explicit description.
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Attach a format hint.
    pub fn with_format(mut self, format: impl Into<Value>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Mark the field as carrying an image.
    pub fn with_image(mut self, is_image: bool) -> Self {
        self.is_image = is_image;
        self
    }

    /// Direction fixed at construction.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether this is an input field.
    pub fn is_input(&self) -> bool {
        self.kind.is_input()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Whether [`finalize`](Self::finalize) has run.
    pub fn is_finalized(&self) -> bool {
        self.state == FieldState::Finalized
    }

    /// Fill in `prefix` and `desc` if they are still unset.
    ///
    /// `prefix` becomes `"{inferred_prefix}:"` and `desc` becomes `"${key}"`.
    /// Values already present are left alone, so a repeated call only has an
    /// effect on values reset to `None` in between.
    pub fn finalize(&mut self, key: &str, inferred_prefix: &str) {
        if self.is_finalized() {
            debug!(key, "finalizing an already finalized field");
        }

        if self.prefix.is_none() {
            self.prefix = Some(format!("{inferred_prefix}:"));
        }

        if self.desc.is_none() {
            self.desc = Some(format!("${{{key}}}"));
        }

        self.state = FieldState::Finalized;
    }
}

// Lifecycle state is bookkeeping, not part of the value.
impl PartialEq for LegacyField {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix
            && self.desc == other.desc
            && self.format == other.format
            && self.is_image == other.is_image
            && self.kind == other.kind
    }
}

impl fmt::Display for LegacyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            FieldKind::Input => "LegacyInputField",
            FieldKind::Output => "LegacyOutputField",
        };
        write!(
            f,
            "{name}(prefix={}, desc={})",
            self.prefix.as_deref().unwrap_or("None"),
            self.desc.as_deref().unwrap_or("None"),
        )
    }
}

/// Rebuild a legacy field from a new-form descriptor.
///
/// `prefix` and `desc` must already be present in the extra metadata; a
/// signature fills them when the field is added. `format` and `is_image` are
/// optional. The result is not finalized.
pub fn legacy_from_new(field: &FieldInfo) -> Result<LegacyField> {
    let extra = field.extra();

    let kind = match extra.get(FIELD_TYPE_KEY) {
        Some(Value::String(marker)) if marker == "input" => FieldKind::Input,
        Some(Value::String(marker)) => {
            if marker != "output" {
                warn!(marker = %marker, "unknown field type marker, treating as output");
            }
            FieldKind::Output
        }
        Some(_) => {
            return Err(FieldsError::InvalidExtraValue {
                key: FIELD_TYPE_KEY.to_string(),
                expected: "a string".to_string(),
            })
        }
        None => return Err(FieldsError::missing_extra(FIELD_TYPE_KEY)),
    };

    let prefix = required_string(field, "prefix")?;
    let desc = required_string(field, "desc")?;

    let format = match extra.get("format") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.clone()),
    };

    let is_image = match extra.get("is_image") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(other) => {
            warn!(value = %other, "non-boolean is_image treated as false");
            false
        }
    };

    Ok(LegacyField::new(kind, prefix, desc, format, is_image))
}

fn required_string(field: &FieldInfo, key: &str) -> Result<Option<String>> {
    match field.extra().get(key) {
        None => Err(FieldsError::missing_extra(key)),
        Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(FieldsError::InvalidExtraValue {
            key: key.to_string(),
            expected: "a string or null".to_string(),
        }),
    }
}
