//! Input and output field constructors.

use serde_json::Value;

use crate::error::Result;
use crate::kwargs::{route_kwargs, Kwargs, FIELD_TYPE_KEY};
use crate::native::FieldInfo;
use crate::types::FieldKind;

/// Declare a field the signature reads.
pub fn make_input_field(kwargs: Kwargs) -> Result<FieldInfo> {
    make_field(FieldKind::Input, kwargs)
}

/// Declare a field the signature produces.
pub fn make_output_field(kwargs: Kwargs) -> Result<FieldInfo> {
    make_field(FieldKind::Output, kwargs)
}

/// Tag `kwargs` with `kind` and build the native descriptor.
///
/// The marker overrides any value the caller passed for the reserved key.
pub fn make_field(kind: FieldKind, mut kwargs: Kwargs) -> Result<FieldInfo> {
    kwargs.insert(FIELD_TYPE_KEY.to_string(), Value::from(kind.as_str()));
    FieldInfo::from_kwargs(route_kwargs(kwargs))
}
