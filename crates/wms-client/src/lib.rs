//! # wms-client: Backend Access for WMS Hub
//!
//! Everything that leaves the process: the REST calls to the warehouse
//! backend, the config file, and the controllers that tie the pure
//! [`wms_core::CrudState`] machines to real requests.
//!
//! ## Call Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  EntityController<E>                                                    │
//! │     │  CrudState::submit → Mutation                                     │
//! │     ▼                                                                   │
//! │  LifetimeToken::run ─── view closed? ──► ClientError::Cancelled         │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Backend (trait) ──► RestBackend ──► HttpClient::request ──► backend    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `HubConfig` (TOML file, environment overrides)
//! - [`http`] - Request wrapper with the status/decoding rules
//! - [`api`] - `Backend` trait and the REST implementation
//! - [`controller`] - Async driver for one entity screen
//! - [`lookup`] - Commodity lookup for the inventory screen
//! - [`lifetime`] - Cancellation tied to a mounted view
//! - [`error`] - `ClientError`

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod lifetime;
pub mod lookup;

pub use api::{Backend, RestBackend};
pub use config::HubConfig;
pub use controller::{EntityController, MutationOutcome};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use lifetime::{Canceller, LifetimeToken, ViewLifetime};
pub use lookup::{load_commodities, CommodityLookup, LookupState};

// =============================================================================
// Test Support
// =============================================================================
