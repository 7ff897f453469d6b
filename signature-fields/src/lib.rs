//! Input/output field metadata for structured signatures
//!
//! `signature-fields` tags schema fields as signature inputs or outputs and
//! converts them to the legacy field representation older consumers expect.
//!
//! # Architecture
//!
//! - **Keyword routing**: [`route_kwargs`] moves the closed set of signature
//!   keys (`desc`, `prefix`, `format`, `is_image`, `parser` and the type
//!   marker) into a `json_schema_extra` record, leaving native arguments alone
//! - **Field constructors**: [`make_input_field`] / [`make_output_field`] tag
//!   the bag and build a native [`FieldInfo`]
//! - **Legacy conversion**: [`legacy_from_new`] rebuilds a [`LegacyField`],
//!   whose `finalize` fills the prefix and description defaults
//! - **Signatures**: [`Signature`] owns named fields and fills their defaults
//!
//! ```
//! use signature_fields::{kwargs, make_input_field, make_output_field, Signature};
//!
//! # fn main() -> signature_fields::Result<()> {
//! let sig = Signature::new()
//!     .field("question", make_input_field(kwargs! { "desc" => "what to answer" })?)?
//!     .field("answer", make_output_field(kwargs! { "max_length" => 200 })?)?;
//!
//! let legacy = sig.to_legacy()?;
//! assert_eq!(legacy[1].1.prefix.as_deref(), Some("Answer:"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod field;
pub mod kwargs;
pub mod legacy;
pub mod native;
pub mod prefix;
pub mod signature;
pub mod types;

pub use error::{FieldsError, Result};
pub use field::{make_field, make_input_field, make_output_field};
pub use kwargs::{
    is_extension_key, route_kwargs, Kwargs, EXTRA_KEY, FIELD_ARG_NAMES, FIELD_TYPE_KEY,
};
pub use legacy::{legacy_from_new, FieldState, LegacyField};
pub use native::FieldInfo;
pub use prefix::infer_prefix;
pub use signature::{NamedField, Signature};
pub use types::{FieldKind, UnknownFieldKind};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}
