//! Shared field vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a field is read by a signature or produced by it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Input,
    Output,
}

impl FieldKind {
    /// The marker value stored under the directionality key.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Input => "input",
            FieldKind::Output => "output",
        }
    }

    /// Whether this is [`FieldKind::Input`].
    pub fn is_input(self) -> bool {
        matches!(self, FieldKind::Input)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is neither `input` nor `output`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field kind: {0}")]
pub struct UnknownFieldKind(pub String);

impl FromStr for FieldKind {
    type Err = UnknownFieldKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(FieldKind::Input),
            "output" => Ok(FieldKind::Output),
            other => Err(UnknownFieldKind(other.to_string())),
        }
    }
}
