use core::str::FromStr;

use hemobank_core::{BloodGroup, DomainError, DomainResult};

use crate::field::{FieldKind, FieldSpec};
use crate::form::{FormData, ValidationReport, validate_form};

/// A validated donation submission: one unit offered for a blood group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationForm {
    pub donor_name: String,
    pub phone: String,
    pub age: u8,
    pub blood_group: BloodGroup,
}

const FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        name: "donorName",
        label: "Full name",
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
        name: "age",
        label: "Age",
        // Donor eligibility window.
        kind: FieldKind::Number {
            min: Some(18),
            max: Some(65),
        },
        required: true,
    },
    FieldSpec {
        name: "bloodGroup",
        label: "Blood group",
        kind: FieldKind::Group,
        required: true,
    },
];

impl DonationForm {
    pub fn field_specs() -> &'static [FieldSpec] {
        &FIELDS
    }

    /// Whole-form validation; every invalid field is reported at once.
    pub fn validate(data: &FormData) -> ValidationReport {
        validate_form(&FIELDS, data)
    }

    /// Parse validated data into a typed form.
    ///
    /// Intended to run only after [`DonationForm::validate`] passes; any
    /// failure here still surfaces as a validation error rather than a
    /// panic.
    pub fn parse(data: &FormData) -> DomainResult<Self> {
        let blood_group = BloodGroup::from_str(data.get("bloodGroup").trim())?;
        let age: u8 = data
            .get("age")
            .trim()
            .parse()
            .map_err(|_| DomainError::validation("age must be a whole number"))?;

        Ok(Self {
            donor_name: data.get("donorName").trim().to_string(),
            phone: data.get("phone").trim().to_string(),
            age,
            blood_group,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldError;

    fn valid_data() -> FormData {
        FormData::new()
            .with("donorName", "Asha Rao")
            .with("phone", "9876543210")
            .with("age", "29")
            .with("bloodGroup", "AB-")
    }

    #[test]
    fn valid_donation_passes_and_parses() {
        let data = valid_data();
        assert!(DonationForm::validate(&data).is_valid());

        let form = DonationForm::parse(&data).unwrap();
        assert_eq!(form.blood_group, BloodGroup::AbNegative);
        assert_eq!(form.age, 29);
        assert_eq!(form.donor_name, "Asha Rao");
    }

    #[test]
    fn underage_donor_is_rejected() {
        let data = valid_data().with("age", "17");
        let report = DonationForm::validate(&data);
        assert!(matches!(report.error("age"), Some(FieldError::Range(_))));
    }

    #[test]
    fn age_above_eligibility_is_rejected() {
        let data = valid_data().with("age", "70");
        assert!(!DonationForm::validate(&data).is_valid());
    }

    #[test]
    fn missing_group_is_reported() {
        let data = valid_data().with("bloodGroup", "");
        let report = DonationForm::validate(&data);
        assert_eq!(report.error("bloodGroup"), Some(&FieldError::Missing));
    }

    #[test]
    fn parse_rejects_unknown_group() {
        let data = valid_data().with("bloodGroup", "Z+");
        assert!(DonationForm::parse(&data).is_err());
    }
}
