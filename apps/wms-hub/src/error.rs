//! # Application Error Type
//!
//! What the shell reports back to the user after a command.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  command line ──► Command::parse ── bad syntax ──► AppError::Usage      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Shell::handle                                                          │
//! │        │  CoreError   (edit while loading, busy, unknown id) ──┐       │
//! │        │  ClientError (cancelled, config)                    ──┤       │
//! │        ▼                                                       ▼       │
//! │  screen rendered                                    "! {AppError}"     │
//! │                                                                         │
//! │  Backend failures are not errors here: they live in the page state     │
//! │  and are rendered as part of the page.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use wms_client::ClientError;
use wms_core::CoreError;

/// Result type alias for shell operations.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// The line is not a known command.
    #[error("Unknown command '{0}'. Type 'help' for the list of commands.")]
    UnknownCommand(String),

    /// A known command with missing or extra arguments.
    #[error("Usage: {0}")]
    Usage(String),

    #[error("Unknown page '{0}'. Pages: dashboard, customers, warehouses, commodities, inventory")]
    UnknownPage(String),

    /// The current page has no such action.
    #[error("'{action}' is not available on the {page} page")]
    NotAvailable { action: String, page: String },

    /// A backend round trip is still running for the current page.
    #[error("Still waiting for the backend. Only 'go <page>', 'help' and 'quit' work until it answers.")]
    Waiting,

    /// The state machine refused the action.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Backend or configuration problem.
    #[error(transparent)]
    Client(ClientError),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            // Keep core refusals in one variant regardless of the path taken.
            ClientError::Core(core) => AppError::Core(core),
            other => AppError::Client(other),
        }
    }
}

impl AppError {
    pub fn not_available(action: impl Into<String>, page: impl Into<String>) -> Self {
        AppError::NotAvailable {
            action: action.into(),
            page: page.into(),
        }
    }

    /// Cancellation is expected on navigation and is not shown.
    pub fn is_silent(&self) -> bool {
        matches!(self, AppError::Client(ClientError::Cancelled))
    }
}
