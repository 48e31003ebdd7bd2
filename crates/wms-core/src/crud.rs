//! # CRUD State Machine
//!
//! Everything one entity screen knows: the list phase, the modal, the draft
//! and its errors. No I/O happens here. Every method either changes state
//! or hands back a [`Mutation`] / [`FetchTicket`] for the caller to execute,
//! and the caller reports the outcome through a `finish_*` method.
//!
//! ## States
//! ```text
//!                 begin_fetch
//!      ┌──────────────────────────────────────────────┐
//!      ▼                                              │
//! ┌─────────┐  finish_fetch(Ok)   ┌─────────┐         │
//! │ Loading │────────────────────►│  Ready  │─────────┤
//! └────┬────┘                     └────┬────┘         │
//!      │ finish_fetch(Err)             │ finish_delete(Err)
//!      ▼                               ▼              │
//! ┌──────────────────┐      ┌──────────────────┐      │
//! │ Error(ListFetch) │      │  Error(Delete)   │──────┘
//! │ list cleared     │      │  list retained   │
//! └──────────────────┘      └──────────────────┘
//!
//! Modal (only opened while the list is shown):
//!
//!   Closed ──open_add──► Adding ──┐
//!     ▲                           ├── submit ──► Invalid (errors, stays open)
//!     │                           │          └─► Dispatch(Mutation)
//!     └──close_modal / ok────── Editing{id}        └─► finish_submit
//! ```
//!
//! ## Ordering Rules
//! - A list completion is applied only if its ticket is the latest one issued.
//! - At most one mutation is in flight; a second one is refused with
//!   [`CoreError::Busy`].

use crate::error::{CoreError, CoreResult};
use crate::form::{prepare_payload, Draft, FieldErrors, Payload};
use crate::schema::Schema;
use crate::types::Entity;

// =============================================================================
// State Types
// =============================================================================

/// Identifies one list fetch. Only the most recent ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Which operation put the screen into the error phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// The list could not be loaded; nothing is shown besides the message.
    ListFetch,
    /// A delete failed; the last list is still shown under the message.
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Error { message: String, origin: ErrorOrigin },
}

impl Phase {
    fn describe(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Error { .. } => "showing an error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Adding,
    Editing { id: String },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }
}

/// A backend change the caller must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { body: Payload },
    Update { id: String, body: Payload },
    Delete { id: String },
}

impl Mutation {
    /// Verb used in logs.
    pub fn verb(&self) -> &'static str {
        match self {
            Mutation::Create { .. } => "create",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
        }
    }
}

/// Result of pressing submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; field errors are set and nothing must be sent.
    Invalid,
    /// Send this mutation, then call `finish_submit`.
    Dispatch(Mutation),
}

// =============================================================================
// CrudState
// =============================================================================

#[derive(Debug, Clone)]
pub struct CrudState<E: Entity> {
    schema: Schema<E::Field>,
    phase: Phase,
    items: Vec<E>,
    modal: Modal,
    draft: Draft<E::Field>,
    field_errors: FieldErrors<E::Field>,
    form_error: Option<String>,
    issued: u64,
    latest: Option<FetchTicket>,
    in_flight: bool,
}

impl<E: Entity> CrudState<E> {
    /// A screen that has not loaded yet.
    pub fn new(schema: Schema<E::Field>) -> Self {
        let draft = Draft::empty(&schema);
        CrudState {
            schema,
            phase: Phase::Loading,
            items: Vec::new(),
            modal: Modal::Closed,
            draft,
            field_errors: FieldErrors::new(),
            form_error: None,
            issued: 0,
            latest: None,
            in_flight: false,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn schema(&self) -> &Schema<E::Field> {
        &self.schema
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn draft(&self) -> &Draft<E::Field> {
        &self.draft
    }

    pub fn field_errors(&self) -> &FieldErrors<E::Field> {
        &self.field_errors
    }

    /// Failure of the last create/update, shown inside the modal.
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn find(&self, id: &str) -> Option<&E> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    /// Whether the list is on screen (add/edit/delete are possible).
    pub fn shows_list(&self) -> bool {
        matches!(
            self.phase,
            Phase::Ready
                | Phase::Error {
                    origin: ErrorOrigin::Delete,
                    ..
                }
        )
    }

    /// Confirmation text shown before a delete.
    pub fn delete_prompt() -> String {
        format!("Are you sure you want to delete this {}?", E::SINGULAR)
    }

    // -------------------------------------------------------------------------
    // List Fetch
    // -------------------------------------------------------------------------

    /// Starts a list fetch. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        self.latest = Some(ticket);
        self.phase = Phase::Loading;
        ticket
    }

    /// Applies a list result. Returns `false` when the ticket was stale and
    /// the result was dropped.
    ///
    /// `Ok(None)` (an empty body) is an empty list. On error the list is
    /// cleared so no partial data is shown.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Option<Vec<E>>, String>,
    ) -> bool {
        if self.latest != Some(ticket) {
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items.unwrap_or_default();
                self.phase = Phase::Ready;
            }
            Err(message) => {
                self.items.clear();
                self.phase = Phase::Error {
                    message,
                    origin: ErrorOrigin::ListFetch,
                };
            }
        }
        true
    }

    // -------------------------------------------------------------------------
    // Modal
    // -------------------------------------------------------------------------

    fn require_list(&self, action: &str) -> CoreResult<()> {
        if self.shows_list() {
            Ok(())
        } else {
            Err(CoreError::invalid_transition(action, self.phase.describe()))
        }
    }

    fn reset_form(&mut self) {
        self.draft = Draft::empty(&self.schema);
        self.field_errors.clear();
        self.form_error = None;
    }

    /// Opens the modal with an empty draft.
    pub fn open_add(&mut self) -> CoreResult<()> {
        self.require_list("add")?;
        self.reset_form();
        self.modal = Modal::Adding;
        Ok(())
    }

    /// Opens the modal seeded from the record with `id`.
    pub fn open_edit(&mut self, id: &str) -> CoreResult<()> {
        self.require_list("edit")?;
        let record = self.find(id).ok_or_else(|| CoreError::RecordNotFound {
            entity: E::SINGULAR.to_string(),
            id: id.to_string(),
        })?;
        let draft = Draft::from_record(&self.schema, record);
        self.reset_form();
        self.draft = draft;
        self.modal = Modal::Editing { id: id.to_string() };
        Ok(())
    }

    /// Closes the modal without sending anything.
    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.reset_form();
    }

    /// Updates one draft field and clears its error.
    pub fn set_field(&mut self, field: E::Field, text: impl Into<String>) -> CoreResult<()> {
        if !self.modal.is_open() {
            return Err(CoreError::invalid_transition("edit a field", "the form is closed"));
        }
        self.draft.set(field, text)?;
        self.field_errors.clear_field(field);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Validates the draft and, if valid, returns the create/update to send.
    pub fn submit(&mut self) -> CoreResult<SubmitOutcome> {
        let target = match &self.modal {
            Modal::Closed => {
                return Err(CoreError::invalid_transition("submit", "the form is closed"))
            }
            Modal::Adding => None,
            Modal::Editing { id } => Some(id.clone()),
        };
        if self.in_flight {
            return Err(CoreError::Busy);
        }

        let body = match prepare_payload(&self.schema, &self.draft) {
            Ok(body) => body,
            Err(errors) => {
                self.field_errors = errors;
                return Ok(SubmitOutcome::Invalid);
            }
        };

        self.field_errors.clear();
        self.form_error = None;
        self.in_flight = true;
        Ok(SubmitOutcome::Dispatch(match target {
            None => Mutation::Create { body },
            Some(id) => Mutation::Update { id, body },
        }))
    }

    /// Records the outcome of a create/update.
    ///
    /// On success the modal closes and the caller must refetch the list.
    /// On failure the message is kept for the modal and the draft is untouched.
    pub fn finish_submit(&mut self, result: Result<(), String>) {
        self.in_flight = false;
        match result {
            Ok(()) => self.close_modal(),
            Err(message) => self.form_error = Some(message),
        }
    }

    /// Releases a create/update/delete whose outcome will never arrive.
    ///
    /// Modal, draft and list stay as they were.
    pub fn abandon_mutation(&mut self) {
        self.in_flight = false;
    }

    /// Returns the delete to send for `id`. The caller confirms first.
    pub fn request_delete(&mut self, id: &str) -> CoreResult<Mutation> {
        self.require_list("delete")?;
        if self.in_flight {
            return Err(CoreError::Busy);
        }
        if self.find(id).is_none() {
            return Err(CoreError::RecordNotFound {
                entity: E::SINGULAR.to_string(),
                id: id.to_string(),
            });
        }
        self.in_flight = true;
        Ok(Mutation::Delete { id: id.to_string() })
    }

    /// Records the outcome of a delete.
    ///
    /// On success the caller must refetch. On failure the list stays as it
    /// was and the message is shown above it.
    pub fn finish_delete(&mut self, result: Result<(), String>) {
        self.in_flight = false;
        if let Err(message) = result {
            self.phase = Phase::Error {
                message,
                origin: ErrorOrigin::Delete,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Commodity, CommodityField, Customer, CustomerField};
    use serde_json::{json, Value};

    fn rice() -> Commodity {
        Commodity {
            id: Some("c1".into()),
            name: "Rice".into(),
            amount: Some(10),
        }
    }

    fn ready_commodities() -> CrudState<Commodity> {
        let mut state = CrudState::new(Commodity::schema());
        let ticket = state.begin_fetch();
        assert!(state.finish_fetch(ticket, Ok(Some(vec![rice()]))));
        state
    }

    #[test]
    fn test_starts_loading_with_empty_form() {
        let state: CrudState<Customer> = CrudState::new(Customer::schema());
        assert_eq!(state.phase(), &Phase::Loading);
        assert_eq!(state.modal(), &Modal::Closed);
        assert_eq!(state.draft().len(), 5);
    }

    #[test]
    fn test_null_list_is_empty() {
        let mut state: CrudState<Commodity> = CrudState::new(Commodity::schema());
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(None));
        assert_eq!(state.phase(), &Phase::Ready);
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_fetch_error_clears_list() {
        let mut state = ready_commodities();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Err("boom".into()));
        assert_eq!(
            state.phase(),
            &Phase::Error {
                message: "boom".into(),
                origin: ErrorOrigin::ListFetch
            }
        );
        assert!(state.items().is_empty());
        assert!(state.open_add().is_err());
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut state: CrudState<Commodity> = CrudState::new(Commodity::schema());
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(state.finish_fetch(second, Ok(Some(vec![rice()]))));
        assert!(!state.finish_fetch(first, Ok(Some(vec![]))));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.phase(), &Phase::Ready);
    }

    #[test]
    fn test_cannot_open_modal_while_loading() {
        let mut state: CrudState<Commodity> = CrudState::new(Commodity::schema());
        state.begin_fetch();
        assert!(matches!(
            state.open_add(),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_valid_create_dispatches_schema_keys_only() {
        let mut state = ready_commodities();
        state.open_add().unwrap();
        state.set_field(CommodityField::Name, "Beans").unwrap();
        state.set_field(CommodityField::Amount, "42").unwrap();

        match state.submit().unwrap() {
            SubmitOutcome::Dispatch(Mutation::Create { body }) => {
                assert_eq!(Value::Object(body), json!({"name": "Beans", "amount": 42}));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(state.is_busy());
    }

    #[test]
    fn test_missing_required_field_blocks_dispatch() {
        let mut state = ready_commodities();
        state.open_add().unwrap();
        state.set_field(CommodityField::Amount, "5").unwrap();

        assert_eq!(state.submit().unwrap(), SubmitOutcome::Invalid);
        assert_eq!(state.field_errors().len(), 1);
        assert_eq!(
            state.field_errors().get(CommodityField::Name),
            Some("Name is required.")
        );
        assert!(state.modal().is_open());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_editing_a_field_clears_its_error() {
        let mut state = ready_commodities();
        state.open_add().unwrap();
        state.submit().unwrap();
        assert_eq!(state.field_errors().len(), 2);

        state.set_field(CommodityField::Name, "Oats").unwrap();
        assert_eq!(state.field_errors().get(CommodityField::Name), None);
        assert!(state.field_errors().get(CommodityField::Amount).is_some());
    }

    #[test]
    fn test_edit_seeds_draft_and_targets_update() {
        let mut state = ready_commodities();
        state.open_edit("c1").unwrap();
        assert_eq!(state.modal(), &Modal::Editing { id: "c1".into() });
        assert_eq!(state.draft().get(CommodityField::Amount), "10");

        match state.submit().unwrap() {
            SubmitOutcome::Dispatch(Mutation::Update { id, body }) => {
                assert_eq!(id, "c1");
                assert_eq!(body.get("amount"), Some(&json!(10)));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_edit_unknown_record() {
        let mut state = ready_commodities();
        assert!(matches!(
            state.open_edit("nope"),
            Err(CoreError::RecordNotFound { .. })
        ));
        assert_eq!(state.modal(), &Modal::Closed);
    }

    #[test]
    fn test_cancel_resets_without_mutation() {
        let mut state = ready_commodities();
        state.open_edit("c1").unwrap();
        state.set_field(CommodityField::Name, "Changed").unwrap();
        state.close_modal();

        assert_eq!(state.modal(), &Modal::Closed);
        assert_eq!(state.items()[0].name, "Rice");
        assert_eq!(state.draft().get(CommodityField::Name), "");
        assert!(!state.is_busy());
    }

    #[test]
    fn test_second_mutation_is_refused_while_busy() {
        let mut state = ready_commodities();
        state.open_edit("c1").unwrap();
        assert!(matches!(state.submit(), Ok(SubmitOutcome::Dispatch(_))));
        assert_eq!(state.submit(), Err(CoreError::Busy));
        assert_eq!(state.request_delete("c1"), Err(CoreError::Busy));
    }

    #[test]
    fn test_abandoned_mutation_frees_the_state() {
        let mut state = ready_commodities();
        state.open_edit("c1").unwrap();
        assert!(matches!(state.submit(), Ok(SubmitOutcome::Dispatch(_))));
        assert!(state.is_busy());

        state.abandon_mutation();
        assert!(!state.is_busy());
        assert!(matches!(state.modal(), Modal::Editing { .. }));
        assert_eq!(state.draft().get(CommodityField::Name), "Rice");
        assert!(matches!(state.request_delete("c1"), Ok(Mutation::Delete { .. })));
    }

    #[test]
    fn test_failed_submit_keeps_modal_and_draft() {
        let mut state = ready_commodities();
        state.open_add().unwrap();
        state.set_field(CommodityField::Name, "Beans").unwrap();
        state.set_field(CommodityField::Amount, "3").unwrap();
        state.submit().unwrap();

        state.finish_submit(Err("Email already exists".into()));
        assert_eq!(state.form_error(), Some("Email already exists"));
        assert_eq!(state.modal(), &Modal::Adding);
        assert_eq!(state.draft().get(CommodityField::Name), "Beans");
        assert!(!state.is_busy());
    }

    #[test]
    fn test_successful_submit_closes_modal() {
        let mut state = ready_commodities();
        state.open_add().unwrap();
        state.set_field(CommodityField::Name, "Beans").unwrap();
        state.set_field(CommodityField::Amount, "3").unwrap();
        state.submit().unwrap();
        state.finish_submit(Ok(()));

        assert_eq!(state.modal(), &Modal::Closed);
        assert_eq!(state.draft().get(CommodityField::Name), "");
        assert_eq!(state.form_error(), None);
    }

    #[test]
    fn test_failed_delete_keeps_item() {
        let mut state = ready_commodities();
        let mutation = state.request_delete("c1").unwrap();
        assert_eq!(mutation, Mutation::Delete { id: "c1".into() });

        state.finish_delete(Err("in use".into()));
        assert_eq!(state.items().len(), 1);
        assert!(matches!(
            state.phase(),
            Phase::Error {
                origin: ErrorOrigin::Delete,
                ..
            }
        ));
        assert!(state.shows_list());
    }

    #[test]
    fn test_delete_prompt_uses_singular() {
        assert_eq!(
            CrudState::<Customer>::delete_prompt(),
            "Are you sure you want to delete this Customer?"
        );
    }

    #[test]
    fn test_set_field_requires_open_modal() {
        let mut state: CrudState<Customer> = CrudState::new(Customer::schema());
        assert!(state.set_field(CustomerField::Email, "a@b.c").is_err());
    }
}
