//! Field-level validation of request inputs.
//!
//! Rules are declared on the input types with `#[derive(Validate)]`; [`check`]
//! runs them and collects every violated field, not just the first.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use validator::{Validate, ValidationError, ValidationErrors};

/// One violated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    /// Rule code: `required`, `email`, `length`, `range`.
    pub rule: String,
    pub message: String,
}

/// All violations of one input, ordered by field name.
///
/// Serializes as a JSON object mapping field name to message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldViolation>);

impl FieldErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&FieldViolation> {
        self.0.iter().find(|v| v.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                // A blank value trips both `required` and the format rule; report the former.
                let err = errs
                    .iter()
                    .find(|e| e.code == "required")
                    .or_else(|| errs.first())?;
                Some(FieldViolation {
                    field: field.to_string(),
                    rule: err.code.to_string(),
                    message: message_for(&field, err),
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        FieldErrors(violations)
    }
}

fn message_for(field: &str, err: &ValidationError) -> String {
    if err.code == "required" {
        return format!("{} is required", field);
    }
    match &err.message {
        Some(msg) => msg.to_string(),
        None => format!("{} is invalid ({})", field, err.code),
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for v in &self.0 {
            map.serialize_entry(&v.field, &v.message)?;
        }
        map.end()
    }
}

/// Run the declared rules of `input`.
pub fn check<T: Validate>(input: &T) -> Result<(), FieldErrors> {
    input.validate().map_err(FieldErrors::from)
}
