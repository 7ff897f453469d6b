//! Signatures: ordered collections of named input and output fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::legacy::{legacy_from_new, LegacyField};
use crate::native::FieldInfo;
use crate::prefix::infer_prefix;
use crate::types::FieldKind;

/// A named field of a signature.
///
/// Direction is read from the field's type marker, which
/// [`Signature::add_field`] has already checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedField {
    name: String,
    info: FieldInfo,
}

impl NamedField {
    /// The field name as declared on the signature.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The new-form descriptor, defaults already filled.
    pub fn info(&self) -> &FieldInfo {
        &self.info
    }

    /// Whether the signature reads or produces this field.
    pub fn kind(&self) -> FieldKind {
        // add_field only admits `input` and `output` markers
        self.info.kind().unwrap_or(FieldKind::Output)
    }
}

/// The fields of a task plus its instructions.
///
/// Adding a field fills the `prefix` and `desc` defaults into its extra
/// metadata, so every field held here converts with [`legacy_from_new`].
/// Deserialization goes through [`Signature::add_field`] for each field and
/// enforces the same rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawSignature")]
pub struct Signature {
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    fields: Vec<NamedField>,
}

/// Unchecked wire form of a [`Signature`].
#[derive(Deserialize)]
struct RawSignature {
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    fields: Vec<NamedField>,
}

impl TryFrom<RawSignature> for Signature {
    type Error = FieldsError;

    fn try_from(raw: RawSignature) -> Result<Self> {
        let mut signature = Signature {
            instructions: raw.instructions,
            fields: Vec::with_capacity(raw.fields.len()),
        };
        for field in raw.fields {
            signature.add_field(field.name, field.info)?;
        }
        Ok(signature)
    }
}

impl Signature {
    /// An empty signature with generated instructions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signature with explicit instructions.
    pub fn with_instructions(instructions: impl Into<String>) -> Self {
        Self {
            instructions: Some(instructions.into()),
            fields: Vec::new(),
        }
    }

    /// Add a field, chaining.
    pub fn field(mut self, name: impl Into<String>, info: FieldInfo) -> Result<Self> {
        self.add_field(name, info)?;
        Ok(self)
    }

    /// Add a field declared with [`make_input_field`](crate::make_input_field)
    /// or [`make_output_field`](crate::make_output_field).
    pub fn add_field(&mut self, name: impl Into<String>, mut info: FieldInfo) -> Result<&mut Self> {
        let name = name.into();

        let kind = info
            .kind()
            .ok_or_else(|| FieldsError::MissingFieldType { name: name.clone() })?;

        if self.get(&name).is_some() {
            return Err(FieldsError::DuplicateField { name });
        }

        let extra = info.extra_mut();
        if !extra.contains_key("prefix") {
            extra.insert(
                "prefix".to_string(),
                Value::String(format!("{}:", infer_prefix(&name))),
            );
        }
        if !extra.contains_key("desc") {
            extra.insert("desc".to_string(), Value::String(format!("${{{name}}}")));
        }

        debug!(name = %name, kind = %kind, "added signature field");
        self.fields.push(NamedField { name, info });
        Ok(self)
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    /// Input fields in declaration order.
    pub fn input_fields(&self) -> impl Iterator<Item = &NamedField> {
        self.fields.iter().filter(|f| f.kind() == FieldKind::Input)
    }

    /// Output fields in declaration order.
    pub fn output_fields(&self) -> impl Iterator<Item = &NamedField> {
        self.fields.iter().filter(|f| f.kind() == FieldKind::Output)
    }

    /// Explicit instructions, or a sentence listing the fields.
    pub fn instructions(&self) -> String {
        if let Some(text) = &self.instructions {
            return text.clone();
        }
        let inputs = backticked(self.input_fields());
        let outputs = backticked(self.output_fields());
        format!("Given the fields {inputs}, produce the fields {outputs}.")
    }

    /// Convert every field to the legacy form and finalize it.
    pub fn to_legacy(&self) -> Result<Vec<(String, LegacyField)>> {
        self.fields
            .iter()
            .map(|field| {
                let mut legacy = legacy_from_new(&field.info)?;
                legacy.finalize(&field.name, &infer_prefix(&field.name));
                Ok((field.name.clone(), legacy))
            })
            .collect()
    }
}

fn backticked<'a>(fields: impl Iterator<Item = &'a NamedField>) -> String {
    fields
        .map(|f| format!("`{}`", f.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{make_input_field, make_output_field};
    use crate::kwargs;
    use crate::Kwargs;

    fn qa() -> Signature {
        Signature::new()
            .field("question", make_input_field(Kwargs::new()).unwrap())
            .unwrap()
            .field("context", make_input_field(kwargs! { "desc" => "facts" }).unwrap())
            .unwrap()
            .field(
                "finalAnswer",
                make_output_field(kwargs! { "prefix" => "Answer:" }).unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn fills_defaults_on_add() {
        let sig = qa();
        let question = sig.get("question").unwrap();
        assert_eq!(question.info.prefix(), Some("Question:"));
        assert_eq!(question.info.desc(), Some("${question}"));

        let context = sig.get("context").unwrap();
        assert_eq!(context.info.desc(), Some("facts"));

        let answer = sig.get("finalAnswer").unwrap();
        assert_eq!(answer.info.prefix(), Some("Answer:"));
        assert_eq!(answer.info.desc(), Some("${finalAnswer}"));
    }

    #[test]
    fn splits_inputs_and_outputs() {
        let sig = qa();
        let inputs: Vec<&str> = sig.input_fields().map(|f| f.name.as_str()).collect();
        let outputs: Vec<&str> = sig.output_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(inputs, vec!["question", "context"]);
        assert_eq!(outputs, vec!["finalAnswer"]);
    }

    #[test]
    fn default_instructions() {
        assert_eq!(
            qa().instructions(),
            "Given the fields `question`, `context`, produce the fields `finalAnswer`."
        );
        let sig = Signature::with_instructions("Answer briefly.");
        assert_eq!(sig.instructions(), "Answer briefly.");
    }

    #[test]
    fn rejects_untyped_field() {
        let err = Signature::new()
            .field("loose", FieldInfo::default())
            .unwrap_err();
        assert!(matches!(err, FieldsError::MissingFieldType { ref name } if name == "loose"));
    }

    #[test]
    fn rejects_duplicate_field() {
        let err = qa()
            .field("question", make_output_field(Kwargs::new()).unwrap())
            .unwrap_err();
        assert!(matches!(err, FieldsError::DuplicateField { ref name } if name == "question"));
    }

    #[test]
    fn legacy_export_is_finalized() {
        let legacy = qa().to_legacy().unwrap();
        assert_eq!(legacy.len(), 3);

        let (name, question) = &legacy[0];
        assert_eq!(name, "question");
        assert!(question.is_input());
        assert!(question.is_finalized());
        assert_eq!(
            question,
            &LegacyField::input()
                .with_prefix("Question:")
                .with_desc("${question}")
        );

        let (_, answer) = &legacy[2];
        assert!(!answer.is_input());
        assert_eq!(answer.prefix.as_deref(), Some("Answer:"));
    }

    #[test]
    fn deserialized_direction_follows_marker() {
        let sig: Signature = serde_json::from_value(serde_json::json!({
            "fields": [
                { "name": "q", "kind": "input", "info": {
                    "json_schema_extra": { "__dspy_field_type": "output" }
                } }
            ]
        }))
        .unwrap();

        let field = sig.get("q").unwrap();
        assert_eq!(field.kind(), FieldKind::Output);
        assert_eq!(sig.input_fields().count(), 0);

        let legacy = sig.to_legacy().unwrap();
        assert_eq!(legacy[0].1.kind(), FieldKind::Output);
        assert_eq!(legacy[0].1.prefix.as_deref(), Some("Q:"));
        assert_eq!(legacy[0].1.desc.as_deref(), Some("${q}"));
    }

    #[test]
    fn deserialization_rejects_duplicate_names() {
        let err = serde_json::from_value::<Signature>(serde_json::json!({
            "fields": [
                { "name": "q", "info": { "json_schema_extra": { "__dspy_field_type": "input" } } },
                { "name": "q", "info": { "json_schema_extra": { "__dspy_field_type": "output" } } }
            ]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("duplicate field name: q"));
    }

    #[test]
    fn deserialization_rejects_untyped_field() {
        let err = serde_json::from_value::<Signature>(serde_json::json!({
            "fields": [ { "name": "loose", "info": {} } ]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("field 'loose'"));
    }
}
