use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{FieldError, FieldSpec, validate_field};

/// Raw submitted field values, keyed by field name.
///
/// Transient: exists only for the duration of one validation+apply cycle.
/// A field that was never set reads as empty, matching how an untouched
/// form control submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    values: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, convenient in tests and wiring code.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// The raw value for a field; empty if the field was never set.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Result of validating a whole form: every invalid field with its message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<&'static str, FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The failure attached to a field, if any.
    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&'static str, &FieldError)> + '_ {
        self.errors.iter().map(|(name, err)| (*name, err))
    }

    pub fn invalid_field_count(&self) -> usize {
        self.errors.len()
    }
}

/// Validate every field of a form against its specs.
///
/// Does NOT short-circuit: all fields are evaluated so the report carries
/// every invalid field's message simultaneously.
pub fn validate_form(specs: &[FieldSpec], data: &FormData) -> ValidationReport {
    let mut report = ValidationReport::default();
    for spec in specs {
        if let Err(error) = validate_field(spec, data.get(spec.name)) {
            report.errors.insert(spec.name, error);
        }
    }
    if !report.is_valid() {
        tracing::debug!(invalid = report.invalid_field_count(), "form rejected");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    const SPECS: [FieldSpec; 3] = [
        FieldSpec {
            name: "name",
            label: "Name",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "phone",
            label: "Phone",
            kind: FieldKind::Phone,
            required: true,
        },
        FieldSpec {
            name: "units",
            label: "Units",
            kind: FieldKind::Number {
                min: Some(1),
                max: Some(20),
            },
            required: true,
        },
    ];

    #[test]
    fn all_invalid_fields_are_reported_at_once() {
        let data = FormData::new().with("phone", "123");

        let report = validate_form(&SPECS, &data);

        assert!(!report.is_valid());
        assert_eq!(report.invalid_field_count(), 3);
        assert_eq!(report.error("name"), Some(&FieldError::Missing));
        assert!(matches!(report.error("phone"), Some(FieldError::Format(_))));
        assert_eq!(report.error("units"), Some(&FieldError::Missing));
    }

    #[test]
    fn a_fully_valid_form_passes() {
        let data = FormData::new()
            .with("name", "Alice")
            .with("phone", "1234567890")
            .with("units", "3");

        let report = validate_form(&SPECS, &data);

        assert!(report.is_valid());
        assert_eq!(report.invalid_field_count(), 0);
    }

    #[test]
    fn fixing_a_field_clears_only_its_message() {
        let data = FormData::new()
            .with("name", "Alice")
            .with("phone", "123")
            .with("units", "3");

        let report = validate_form(&SPECS, &data);
        assert_eq!(report.invalid_field_count(), 1);
        assert!(report.error("name").is_none());
        assert!(report.error("units").is_none());
    }

    #[test]
    fn unset_fields_read_as_empty() {
        let data = FormData::new();
        assert_eq!(data.get("anything"), "");
    }
}
