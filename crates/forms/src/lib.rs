//! Form validation engine.
//!
//! Field-level constraint checking (required / phone / numeric / blood
//! group) plus whole-form evaluation. Validation never short-circuits
//! across fields: every invalid field carries its message at once, so the
//! UI can surface all of them simultaneously. Within a field the first
//! applicable failure wins.

pub mod donation;
pub mod field;
pub mod form;
pub mod request;

pub use donation::DonationForm;
pub use field::{FieldError, FieldKind, FieldSpec, validate_field};
pub use form::{FormData, ValidationReport, validate_form};
pub use request::RequestForm;
