//! # Entity Controller
//!
//! Drives a [`CrudState`] against a [`Backend`]. The state machine decides;
//! this type performs the calls it asks for and feeds the outcomes back.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit()                                                               │
//! │    │                                                                    │
//! │    ├── CrudState::submit ──► Invalid ──────────────► no call           │
//! │    │                                                                    │
//! │    └── Dispatch(Create|Update)                                          │
//! │          │ lifetime.run(backend.create/update)                          │
//! │          ├── Ok  ──► finish_submit(Ok)  ──► reload()  (GET list)       │
//! │          ├── Err ──► finish_submit(Err) ──► message in modal           │
//! │          └── Cancelled ─────────────────► Err(Cancelled)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Every async method takes `&mut self`, and the state machine refuses a
//! second mutation while one is in flight, so one controller never has two
//! writes racing each other.

use std::sync::Arc;

use tracing::{debug, info, warn};
use wms_core::{CrudState, Entity, Mutation, Schema, SubmitOutcome};

use crate::api::{decode_list, Backend};
use crate::error::{ClientError, ClientResult};
use crate::lifetime::LifetimeToken;

/// What became of a submit or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    /// The backend accepted the change and the list was reloaded.
    Applied,
    /// The backend rejected the change (or could not be reached).
    Failed(String),
}

pub struct EntityController<E: Entity, B: Backend + ?Sized = dyn Backend> {
    backend: Arc<B>,
    state: CrudState<E>,
    token: LifetimeToken,
}

impl<E: Entity, B: Backend + ?Sized> EntityController<E, B> {
    /// A controller in the loading state. Call [`mount`](Self::mount) next.
    pub fn new(backend: Arc<B>, schema: Schema<E::Field>, token: LifetimeToken) -> Self {
        EntityController {
            backend,
            state: CrudState::new(schema),
            token,
        }
    }

    pub fn state(&self) -> &CrudState<E> {
        &self.state
    }

    /// Confirmation text for a delete of this entity.
    pub fn delete_prompt() -> String {
        CrudState::<E>::delete_prompt()
    }

    fn ensure_alive(&self) -> ClientResult<()> {
        if self.token.is_cancelled() {
            debug!(resource = E::RESOURCE, "Ignoring request from a closed view");
            return Err(ClientError::Cancelled);
        }
        Ok(())
    }

    // =========================================================================
    // List
    // =========================================================================

    /// Initial list fetch.
    pub async fn mount(&mut self) -> ClientResult<()> {
        info!(resource = E::RESOURCE, "Mounting {} view", E::TITLE);
        self.reload().await
    }

    /// Fetches the list and replaces the items.
    ///
    /// A failed fetch is recorded in the state, not returned. Only
    /// cancellation is an `Err`.
    pub async fn reload(&mut self) -> ClientResult<()> {
        self.ensure_alive()?;
        let ticket = self.state.begin_fetch();
        debug!(resource = E::RESOURCE, ticket = ticket.sequence(), "Fetching list");

        let result = self.token.run(self.backend.list(E::RESOURCE)).await;
        let outcome = match result {
            Err(ClientError::Cancelled) => {
                debug!(resource = E::RESOURCE, "List fetch cancelled");
                return Err(ClientError::Cancelled);
            }
            Err(e) => Err(e),
            Ok(body) => decode_list::<E>(body),
        };

        let outcome = outcome.map_err(|e| {
            warn!(resource = E::RESOURCE, error = %e, "List fetch failed");
            e.to_string()
        });

        if self.state.finish_fetch(ticket, outcome) {
            debug!(resource = E::RESOURCE, count = self.state.items().len(), "List applied");
        } else {
            debug!(resource = E::RESOURCE, ticket = ticket.sequence(), "Discarded stale list");
        }
        Ok(())
    }

    // =========================================================================
    // Modal
    // =========================================================================

    pub fn open_add(&mut self) -> ClientResult<()> {
        self.state.open_add()?;
        debug!(resource = E::RESOURCE, "Add form opened");
        Ok(())
    }

    pub fn open_edit(&mut self, id: &str) -> ClientResult<()> {
        self.state.open_edit(id)?;
        debug!(resource = E::RESOURCE, id, "Edit form opened");
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.state.close_modal();
    }

    pub fn set_field(&mut self, field: E::Field, text: impl Into<String>) -> ClientResult<()> {
        self.state.set_field(field, text)?;
        Ok(())
    }

    /// Sets a field addressed by its JSON key (case-insensitive).
    pub fn set_field_named(&mut self, name: &str, text: impl Into<String>) -> ClientResult<()> {
        let field = self
            .state
            .schema()
            .find_by_name(name)
            .map(|d| d.field)
            .ok_or_else(|| wms_core::CoreError::UnknownField(name.to_string()))?;
        self.set_field(field, text)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    async fn execute(&self, mutation: &Mutation) -> ClientResult<()> {
        match mutation {
            Mutation::Create { body } => self.backend.create(E::RESOURCE, body).await,
            Mutation::Update { id, body } => self.backend.update(E::RESOURCE, id, body).await,
            Mutation::Delete { id } => self.backend.delete(E::RESOURCE, id).await,
        }
    }

    /// Validates the draft and sends the create or update.
    pub async fn submit(&mut self) -> ClientResult<MutationOutcome> {
        self.ensure_alive()?;
        let mutation = match self.state.submit()? {
            SubmitOutcome::Invalid => {
                debug!(resource = E::RESOURCE, "Submit blocked by validation");
                return Ok(MutationOutcome::Invalid);
            }
            SubmitOutcome::Dispatch(mutation) => mutation,
        };

        match self.token.run(self.execute(&mutation)).await {
            Ok(()) => {
                info!(resource = E::RESOURCE, action = mutation.verb(), "{} saved", E::SINGULAR);
                self.state.finish_submit(Ok(()));
                self.reload().await?;
                Ok(MutationOutcome::Applied)
            }
            Err(ClientError::Cancelled) => {
                self.state.abandon_mutation();
                Err(ClientError::Cancelled)
            }
            Err(e) => {
                warn!(resource = E::RESOURCE, action = mutation.verb(), error = %e, "Save failed");
                let message = e.to_string();
                self.state.finish_submit(Err(message.clone()));
                Ok(MutationOutcome::Failed(message))
            }
        }
    }

    /// Deletes a record. The caller asks for confirmation first.
    pub async fn delete(&mut self, id: &str) -> ClientResult<MutationOutcome> {
        self.ensure_alive()?;
        let mutation = self.state.request_delete(id)?;

        match self.token.run(self.execute(&mutation)).await {
            Ok(()) => {
                info!(resource = E::RESOURCE, id, "{} deleted", E::SINGULAR);
                self.state.finish_delete(Ok(()));
                self.reload().await?;
                Ok(MutationOutcome::Applied)
            }
            Err(ClientError::Cancelled) => {
                self.state.abandon_mutation();
                Err(ClientError::Cancelled)
            }
            Err(e) => {
                warn!(resource = E::RESOURCE, id, error = %e, "Delete failed");
                let message = e.to_string();
                self.state.finish_delete(Err(message.clone()));
                Ok(MutationOutcome::Failed(message))
            }
        }
    }
}
