//! Blood group vocabulary.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the 8 donor/recipient compatibility categories.
///
/// The set is closed: no dynamic creation, no "unknown" variant.
/// Declaration order is the display order used by inventory listings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All groups, in display order.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// The canonical label ("A+", "AB-", ...), also the serde form.
    pub fn label(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl core::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BloodGroup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodGroup::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| DomainError::invalid_group(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for group in BloodGroup::ALL {
            assert_eq!(group.label().parse::<BloodGroup>().unwrap(), group);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "C+".parse::<BloodGroup>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidGroup(_)));
    }

    #[test]
    fn lowercase_label_is_rejected() {
        assert!("ab+".parse::<BloodGroup>().is_err());
    }

    #[test]
    fn serde_form_matches_label() {
        for group in BloodGroup::ALL {
            let json = serde_json::to_string(&group).unwrap();
            assert_eq!(json, format!("\"{}\"", group.label()));
            let back: BloodGroup = serde_json::from_str(&json).unwrap();
            assert_eq!(back, group);
        }
    }
}
