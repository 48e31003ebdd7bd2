//! # wms-core: Pure Client Logic for WMS Hub
//!
//! This crate holds everything the warehouse screens decide without touching
//! the network: the records, their editable schemas, draft validation and
//! coercion, and the CRUD state machine each entity screen runs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        WMS Hub Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    wms-hub (terminal shell)                     │   │
//! │  │    Nav bar ──► Page adapter ──► Table / Modal / Form           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                wms-client (EntityController)                    │   │
//! │  │    list / create / update / delete over REST                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ wms-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  schema   │  │   form    │  │   crud    │  │   │
//! │  │   │ Customer  │  │ Descriptor│  │   Draft   │  │ CrudState │  │   │
//! │  │   │ Inventory │  │  Schema   │  │  Payload  │  │  Mutation │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TERMINAL • PURE STATE               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records and the `Entity` trait
//! - [`schema`] - Field descriptors and schemas
//! - [`form`] - Drafts, field errors and request-body coercion
//! - [`validation`] - Per-field rules
//! - [`crud`] - The list/modal state machine
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use wms_core::crud::{CrudState, Mutation, SubmitOutcome};
//! use wms_core::types::{Commodity, CommodityField, Entity};
//!
//! let mut state: CrudState<Commodity> = CrudState::new(Commodity::schema());
//! let ticket = state.begin_fetch();
//! state.finish_fetch(ticket, Ok(Some(vec![])));
//!
//! state.open_add().unwrap();
//! state.set_field(CommodityField::Name, "Rice").unwrap();
//! state.set_field(CommodityField::Amount, "42").unwrap();
//!
//! match state.submit().unwrap() {
//!     SubmitOutcome::Dispatch(Mutation::Create { body }) => {
//!         assert_eq!(body["amount"], 42);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod crud;
pub mod error;
pub mod form;
pub mod schema;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use crud::{CrudState, ErrorOrigin, FetchTicket, Modal, Mutation, Phase, SubmitOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use form::{Draft, FieldErrors, Payload};
pub use schema::{EntityField, FieldDescriptor, FieldKind, Schema, SelectOption};
pub use types::*;
