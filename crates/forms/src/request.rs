use core::str::FromStr;

use hemobank_core::{BloodGroup, DomainError, DomainResult};

use crate::field::{FieldKind, FieldSpec};
use crate::form::{FormData, ValidationReport, validate_form};

/// Largest unit count a single request form accepts. Availability against
/// actual stock is checked later, at submission time.
pub const MAX_REQUEST_UNITS: i64 = 20;

/// A validated blood request: N units wanted for a blood group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestForm {
    pub patient_name: String,
    pub phone: String,
    pub blood_group: BloodGroup,
    pub units: u32,
}

const FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        name: "patientName",
        label: "Patient name",
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
        name: "requestBloodGroup",
        label: "Blood group",
        kind: FieldKind::Group,
        required: true,
    },
    FieldSpec {
        name: "units",
        label: "Units",
        kind: FieldKind::Number {
            min: Some(1),
            max: Some(MAX_REQUEST_UNITS),
        },
        required: true,
    },
];

impl RequestForm {
    pub fn field_specs() -> &'static [FieldSpec] {
        &FIELDS
    }

    /// Whole-form validation; every invalid field is reported at once.
    pub fn validate(data: &FormData) -> ValidationReport {
        validate_form(&FIELDS, data)
    }

    /// Parse validated data into a typed form.
    ///
    /// Intended to run only after [`RequestForm::validate`] passes; any
    /// failure here still surfaces as a validation error rather than a
    /// panic.
    pub fn parse(data: &FormData) -> DomainResult<Self> {
        let blood_group = BloodGroup::from_str(data.get("requestBloodGroup").trim())?;
        let units: u32 = data
            .get("units")
            .trim()
            .parse()
            .map_err(|_| DomainError::validation("units must be a whole number"))?;

        Ok(Self {
            patient_name: data.get("patientName").trim().to_string(),
            phone: data.get("phone").trim().to_string(),
            blood_group,
            units,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldError;

    fn valid_data() -> FormData {
        FormData::new()
            .with("patientName", "Ravi Kumar")
            .with("phone", "9012345678")
            .with("requestBloodGroup", "B-")
            .with("units", "10")
    }

    #[test]
    fn valid_request_passes_and_parses() {
        let data = valid_data();
        assert!(RequestForm::validate(&data).is_valid());

        let form = RequestForm::parse(&data).unwrap();
        assert_eq!(form.blood_group, BloodGroup::BNegative);
        assert_eq!(form.units, 10);
    }

    #[test]
    fn zero_units_is_out_of_range() {
        let data = valid_data().with("units", "0");
        let report = RequestForm::validate(&data);
        assert!(matches!(report.error("units"), Some(FieldError::Range(_))));
    }

    #[test]
    fn units_above_the_form_cap_are_rejected() {
        let data = valid_data().with("units", "21");
        assert!(!RequestForm::validate(&data).is_valid());
    }

    #[test]
    fn short_phone_is_a_format_failure() {
        let data = valid_data().with("phone", "12345");
        let report = RequestForm::validate(&data);
        assert!(matches!(report.error("phone"), Some(FieldError::Format(_))));
    }

    #[test]
    fn ten_units_validates_even_when_stock_may_not_cover_it() {
        // Availability is a submission concern; the form only bounds the ask.
        let data = valid_data().with("units", "10");
        assert!(RequestForm::validate(&data).is_valid());
    }
}
