use core::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use hemobank_core::BloodGroup;

/// What a field holds, and the constraints that come with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; only the `required` constraint applies.
    Text,
    /// Exactly 10 decimal digits, no spaces, punctuation, or country code.
    Phone,
    /// Base-10 integer with optional inclusive bounds.
    Number { min: Option<i64>, max: Option<i64> },
    /// A blood group label from the closed set.
    Group,
}

/// Declarative description of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in the submitted form data.
    pub name: &'static str,
    /// Human label, used in range messages.
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Per-field validation failure. The display form is the message shown
/// next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum FieldError {
    #[error("This field is required")]
    Missing,

    #[error("{0}")]
    Format(String),

    #[error("{0}")]
    Range(String),
}

/// Validate one field value against its spec.
///
/// The value is trimmed first. The `required` check runs before the kind
/// check, and the first failure found is the one reported; a blank value in
/// a non-required field is valid without further checks.
///
/// Non-numeric input in a `Number` field is rejected as a range failure
/// rather than silently accepted.
pub fn validate_field(spec: &FieldSpec, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();

    if value.is_empty() {
        return if spec.required {
            Err(FieldError::Missing)
        } else {
            Ok(())
        };
    }

    match &spec.kind {
        FieldKind::Text => Ok(()),

        FieldKind::Phone => {
            if value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()) {
                Ok(())
            } else {
                Err(FieldError::Format(
                    "Please enter a valid 10-digit phone number".to_string(),
                ))
            }
        }

        FieldKind::Number { min, max } => {
            let parsed: i64 = value.parse().map_err(|_| {
                FieldError::Range(format!("{} must be a whole number", spec.label))
            })?;
            if let Some(min) = *min {
                if parsed < min {
                    return Err(FieldError::Range(format!("Minimum value is {min}")));
                }
            }
            if let Some(max) = *max {
                if parsed > max {
                    return Err(FieldError::Range(format!("Maximum value is {max}")));
                }
            }
            Ok(())
        }

        FieldKind::Group => match BloodGroup::from_str(value) {
            Ok(_) => Ok(()),
            Err(_) => Err(FieldError::Format(
                "Please select a valid blood group".to_string(),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: FieldKind, required: bool) -> FieldSpec {
        FieldSpec {
            name: "field",
            label: "Field",
            kind,
            required,
        }
    }

    #[test]
    fn required_rejects_blank_and_whitespace() {
        let s = spec(FieldKind::Text, true);
        assert_eq!(validate_field(&s, ""), Err(FieldError::Missing));
        assert_eq!(validate_field(&s, "   "), Err(FieldError::Missing));
        assert_eq!(validate_field(&s, "Alice"), Ok(()));
    }

    #[test]
    fn required_runs_before_kind_checks() {
        // An empty phone field reports Missing, not a format failure.
        let s = spec(FieldKind::Phone, true);
        assert_eq!(validate_field(&s, " "), Err(FieldError::Missing));
    }

    #[test]
    fn optional_blank_skips_kind_checks() {
        let s = spec(FieldKind::Phone, false);
        assert_eq!(validate_field(&s, ""), Ok(()));
    }

    #[test]
    fn phone_requires_exactly_ten_digits() {
        let s = spec(FieldKind::Phone, true);
        assert!(matches!(validate_field(&s, "12345"), Err(FieldError::Format(_))));
        assert!(matches!(validate_field(&s, "12345678901"), Err(FieldError::Format(_))));
        assert!(matches!(validate_field(&s, "123-456-7890"), Err(FieldError::Format(_))));
        assert!(matches!(validate_field(&s, "+1234567890"), Err(FieldError::Format(_))));
        assert_eq!(validate_field(&s, "1234567890"), Ok(()));
        // Leading/trailing whitespace is trimmed, inner digits must stand alone.
        assert_eq!(validate_field(&s, " 1234567890 "), Ok(()));
    }

    #[test]
    fn number_bounds_are_inclusive() {
        let s = spec(
            FieldKind::Number {
                min: Some(1),
                max: Some(20),
            },
            true,
        );
        assert_eq!(validate_field(&s, "1"), Ok(()));
        assert_eq!(validate_field(&s, "20"), Ok(()));
        assert!(matches!(validate_field(&s, "0"), Err(FieldError::Range(_))));
        assert!(matches!(validate_field(&s, "21"), Err(FieldError::Range(_))));
    }

    #[test]
    fn non_numeric_input_is_rejected_not_silently_accepted() {
        let s = spec(
            FieldKind::Number {
                min: Some(1),
                max: Some(20),
            },
            true,
        );
        assert!(matches!(validate_field(&s, "ten"), Err(FieldError::Range(_))));
        assert!(matches!(validate_field(&s, "3.5"), Err(FieldError::Range(_))));
    }

    #[test]
    fn unbounded_number_accepts_any_integer() {
        let s = spec(FieldKind::Number { min: None, max: None }, true);
        assert_eq!(validate_field(&s, "-40"), Ok(()));
    }

    #[test]
    fn group_accepts_only_known_labels() {
        let s = spec(FieldKind::Group, true);
        assert_eq!(validate_field(&s, "AB-"), Ok(()));
        assert!(matches!(validate_field(&s, "C+"), Err(FieldError::Format(_))));
    }

    #[test]
    fn messages_match_the_ui_strings() {
        let s = spec(FieldKind::Phone, true);
        assert_eq!(
            validate_field(&s, "12345").unwrap_err().to_string(),
            "Please enter a valid 10-digit phone number"
        );
        assert_eq!(FieldError::Missing.to_string(), "This field is required");
    }
}
