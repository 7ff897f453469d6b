//! Error types for field construction and legacy conversion

use thiserror::Error;

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while building or converting fields
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A native field argument had the wrong shape
    #[error("invalid field argument '{arg}': {message}")]
    InvalidArgument { arg: String, message: String },

    /// A native `pattern` argument did not compile
    #[error("invalid field pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A required key was absent from the extra metadata
    #[error("extra metadata is missing required key '{key}'")]
    MissingExtraKey { key: String },

    /// An extra metadata value had the wrong JSON type
    #[error("extra metadata key '{key}' must be {expected}")]
    InvalidExtraValue { key: String, expected: String },

    /// A signature field was not declared with an input or output constructor
    #[error("field '{name}' must be declared with make_input_field or make_output_field")]
    MissingFieldType { name: String },

    /// Duplicate field name within a signature
    #[error("duplicate field name: {name}")]
    DuplicateField { name: String },
}

impl FieldsError {
    pub(crate) fn invalid_argument(arg: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg: arg.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn missing_extra(key: &str) -> Self {
        Self::MissingExtraKey {
            key: key.to_string(),
        }
    }
}
