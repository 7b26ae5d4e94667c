//! The module contains the errors the record store can report.
//!
//! None of them is fatal: every failure leaves the store unchanged and is
//! handed back to the caller, which decides how to present it.
//!
//! - [`KeyNotFound`] thrown when an id is absent from the target collection.
//! - [`ReferenceNotFound`] thrown when a cross-collection reference does not
//!   resolve (a trip leg's trip, the ids passed to traveler membership).
//! - [`ExistingKey`] thrown when a traveler is already on a trip.
//! - [`Forbidden`] thrown when a fixed policy refuses the operation.
//! - [`InvalidField`] thrown when a raw field value cannot be parsed.
//! - [`InvalidRole`] thrown when a role name is not one of the known tiers.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ReferenceNotFound`]: EngineError::ReferenceNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`InvalidField`]: EngineError::InvalidField
//!  [`InvalidRole`]: EngineError::InvalidRole
use thiserror::Error;

use crate::FieldRejection;

/// Engine custom errors.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0} not found!")]
    KeyNotFound(String),
    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),
    #[error("{0} already present!")]
    ExistingKey(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Invalid role: {0}")]
    InvalidRole(String),
}

impl From<FieldRejection> for EngineError {
    fn from(value: FieldRejection) -> Self {
        Self::InvalidField {
            field: value.field,
            reason: value.reason,
        }
    }
}
