//! # Validation Module
//!
//! Client-side checks run on submit, before anything reaches the network.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Per-Field Rules                                    │
//! │                                                                         │
//! │  text empty  && !optional          → "{label} is required."            │
//! │  numeric     && non-empty          → must parse as an integer          │
//! │                                      else "{label} must be a valid     │
//! │                                      number."                           │
//! │  select      && non-empty          → must equal an option value        │
//! │                                      else "{label} must be one of the  │
//! │                                      listed options."                   │
//! │                                                                         │
//! │  Fields are checked independently; a submit proceeds only when         │
//! │  every field passes.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::form::{Draft, FieldErrors};
use crate::schema::{EntityField, FieldDescriptor, Schema};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parses numeric input text. Surrounding whitespace is ignored.
///
/// Returns `Ok(None)` for blank text.
pub fn parse_integer(text: &str) -> Result<Option<i64>, std::num::ParseIntError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<i64>().map(Some)
}

/// Whether the text counts as "no value" for the field's kind.
pub fn is_blank<F: EntityField>(descriptor: &FieldDescriptor<F>, text: &str) -> bool {
    if descriptor.kind.is_numeric() {
        text.trim().is_empty()
    } else {
        text.is_empty()
    }
}

/// Validates one field value against its descriptor.
///
/// ## Example
/// ```rust
/// use wms_core::types::{Entity, Warehouse, WarehouseField};
/// use wms_core::validation::validate_field;
///
/// let schema = Warehouse::schema();
/// let storage = schema.get(WarehouseField::Storage).unwrap();
///
/// assert!(validate_field(storage, "42").is_ok());
/// assert!(validate_field(storage, "").is_err());
/// assert!(validate_field(storage, "lots").is_err());
/// ```
pub fn validate_field<F: EntityField>(
    descriptor: &FieldDescriptor<F>,
    text: &str,
) -> ValidationResult<()> {
    if is_blank(descriptor, text) {
        if descriptor.optional {
            return Ok(());
        }
        return Err(ValidationError::Required {
            label: descriptor.label.clone(),
        });
    }

    if descriptor.kind.is_numeric() && parse_integer(text).is_err() {
        return Err(ValidationError::NotANumber {
            label: descriptor.label.clone(),
        });
    }

    if let Some(options) = &descriptor.options {
        if !options.iter().any(|o| o.value == text) {
            return Err(ValidationError::NotAnOption {
                label: descriptor.label.clone(),
            });
        }
    }

    Ok(())
}

/// Validates every schema field of a draft.
///
/// Returns an empty map when the draft may be submitted.
pub fn validate_draft<F: EntityField>(schema: &Schema<F>, draft: &Draft<F>) -> FieldErrors<F> {
    let mut errors = FieldErrors::new();
    for descriptor in schema.iter() {
        if let Err(e) = validate_field(descriptor, draft.get(descriptor.field)) {
            errors.set(descriptor.field, e.to_string());
        }
    }
    errors
}
