//! Shared validation rules
//!
//! The same rule table backs the wizard's step gate and the server's
//! authoritative check before persisting.

pub mod field_errors;
pub mod rules;
pub mod validators;

pub use field_errors::FieldErrors;
pub use rules::{check_field, parse_configuration, validate_document, validate_step, validate_steps};
