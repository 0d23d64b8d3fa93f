//! Domain error model.

use thiserror::Error;

use crate::group::BloodGroup;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Storage and
/// collaborator concerns belong elsewhere. None of these are fatal: every
/// failure path returns control to a re-submittable state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An unknown blood group label.
    #[error("unknown blood group: {0:?}")]
    InvalidGroup(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A request would draw more units than the group holds.
    #[error("insufficient stock for {group}: requested {requested}, available {available}")]
    InsufficientStock {
        group: BloodGroup,
        requested: u32,
        available: u32,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_group(label: impl Into<String>) -> Self {
        Self::InvalidGroup(label.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn insufficient_stock(group: BloodGroup, requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            group,
            requested,
            available,
        }
    }
}
