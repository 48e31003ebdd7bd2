//! # Error Types
//!
//! Domain-specific error types for wms-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  wms-core errors (this file)                                           │
//! │  ├── CoreError        - Illegal state machine requests                 │
//! │  └── ValidationError  - A single field failed its rule                 │
//! │                                                                         │
//! │  wms-client errors (separate crate)                                    │
//! │  └── ClientError      - Transport / status / decode / cancellation     │
//! │                                                                         │
//! │  wms-hub errors (in app)                                               │
//! │  └── AppError         - What the shell reports                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → AppError → Screen   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the CRUD state machine.
///
/// None of these reach the network: they describe requests the current
/// state cannot honour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The requested event is not valid in the current state.
    ///
    /// ## When This Occurs
    /// - `submit` while the modal is closed
    /// - `edit` while the list is still loading
    #[error("Cannot {action} while {state}")]
    InvalidTransition { action: String, state: String },

    /// A mutation is already in flight for this controller.
    #[error("Another change is still being saved")]
    Busy,

    /// The record to edit or delete is not in the current list.
    #[error("{entity} not found: {id}")]
    RecordNotFound { entity: String, id: String },

    /// The field is not part of the active schema.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidTransition error.
    pub fn invalid_transition(action: impl Into<String>, state: impl Into<String>) -> Self {
        CoreError::InvalidTransition {
            action: action.into(),
            state: state.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A field-level validation failure.
///
/// The display string is exactly what the form shows under the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{label} is required.")]
    Required { label: String },

    /// A numeric field holds text that is not an integer.
    #[error("{label} must be a valid number.")]
    NotANumber { label: String },

    /// A select field holds a value outside its options.
    #[error("{label} must be one of the listed options.")]
    NotAnOption { label: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
