//! # Entity View
//!
//! One generic page for every entity: an [`EntityController`] plus the
//! rendering of its state.
//!
//! ## Layout
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ Error: Delete failed          ◄── only after a failed delete  │
//! │                                                               │
//! │ Commodities Management                  [ Add New Commodity ] │
//! │                                                               │
//! │ Name | Amount (quantity) | ID | Actions                       │
//! │ -----+-------------------+----+--------------                 │
//! │ Rice | 10                | c1 | {edit} <delete>               │
//! │                                                               │
//! │ ┌─ Edit Commodity ────── [x] ┐  ◄── while the modal is open   │
//! │ │ ...                        │                                │
//! │ └────────────────────────────┘                                │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//! While loading, or after a failed list fetch, the page is a single line.

use std::sync::Arc;

use async_trait::async_trait;
use wms_client::{Backend, EntityController, LifetimeToken, MutationOutcome};
use wms_core::{CoreError, CrudState, Entity, ErrorOrigin, Modal as ModalState, Phase};

use super::{EntityPage, Screen};
use crate::error::AppResult;
use crate::shell::Page;
use crate::ui::{Button, ButtonSize, ButtonVariant, Input, Modal, Select, Table};

pub struct EntityView<P: EntityPage> {
    page: P,
    controller: EntityController<P::Record>,
}

impl<P: EntityPage> EntityView<P> {
    /// Builds the controller from the page schema. Nothing is fetched
    /// until [`Screen::mount`].
    pub fn new(page: P, backend: Arc<dyn Backend>, token: LifetimeToken) -> Self {
        let controller = EntityController::new(backend, page.schema(), token);
        EntityView { page, controller }
    }

    pub fn state(&self) -> &CrudState<P::Record> {
        self.controller.state()
    }

    pub fn config(&self) -> &P {
        &self.page
    }
}

#[async_trait]
impl<P: EntityPage> Screen for EntityView<P> {
    fn page(&self) -> Page {
        self.page.page()
    }

    fn render(&self) -> String {
        render_entity(&self.page, self.controller.state())
    }

    fn needs_mount(&self) -> bool {
        true
    }

    async fn mount(&mut self) -> AppResult<()> {
        self.controller.mount().await?;
        Ok(())
    }

    async fn reload(&mut self) -> AppResult<()> {
        self.controller.reload().await?;
        Ok(())
    }

    fn open_add(&mut self) -> AppResult<()> {
        self.controller.open_add()?;
        Ok(())
    }

    fn open_edit(&mut self, id: &str) -> AppResult<()> {
        self.controller.open_edit(id)?;
        Ok(())
    }

    fn set_field(&mut self, name: &str, value: &str) -> AppResult<()> {
        self.controller.set_field_named(name, value)?;
        Ok(())
    }

    fn cancel(&mut self) -> AppResult<()> {
        self.controller.close_modal();
        Ok(())
    }

    async fn submit(&mut self) -> AppResult<MutationOutcome> {
        Ok(self.controller.submit().await?)
    }

    fn delete_prompt(&self, id: &str) -> AppResult<String> {
        let state = self.controller.state();
        if !state.shows_list() {
            return Err(CoreError::invalid_transition("delete", "the list is not shown").into());
        }
        if state.is_busy() {
            return Err(CoreError::Busy.into());
        }
        if state.find(id).is_none() {
            return Err(CoreError::RecordNotFound {
                entity: <P::Record as Entity>::SINGULAR.to_string(),
                id: id.to_string(),
            }
            .into());
        }
        Ok(EntityController::<P::Record>::delete_prompt())
    }

    async fn delete(&mut self, id: &str) -> AppResult<MutationOutcome> {
        Ok(self.controller.delete(id).await?)
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the page for the given controller state.
pub fn render_entity<P: EntityPage>(page: &P, state: &CrudState<P::Record>) -> String {
    let title = <P::Record as Entity>::TITLE;
    let singular = <P::Record as Entity>::SINGULAR;

    match state.phase() {
        Phase::Loading => return format!("Loading {}...", title),
        Phase::Error {
            message,
            origin: ErrorOrigin::ListFetch,
        } => return format!("Error: {}", message),
        _ => {}
    }

    let mut sections = Vec::new();
    if let Phase::Error { message, .. } = state.phase() {
        sections.push(format!("Error: {}", message));
    }

    let add = Button::new(format!("Add New {}", singular)).action("add");
    sections.push(format!("{} Management    {}", title, add.render()));
    sections.push(render_table(page, state));

    if let Some(form) = render_form(state) {
        sections.push(form);
    }
    sections.join("\n\n")
}

fn row_actions(id: &str) -> [Button; 2] {
    [
        Button::new("edit")
            .variant(ButtonVariant::Secondary)
            .size(ButtonSize::Icon)
            .action(format!("edit {}", id))
            .attr("title", "Edit"),
        Button::new("delete")
            .variant(ButtonVariant::Destructive)
            .size(ButtonSize::Icon)
            .action(format!("delete {}", id))
            .attr("title", "Delete"),
    ]
}

fn render_table<P: EntityPage>(page: &P, state: &CrudState<P::Record>) -> String {
    let schema = state.schema();
    let mut headers: Vec<String> = schema.iter().map(|d| d.label.clone()).collect();
    headers.push("ID".to_string());
    headers.push("Actions".to_string());

    let empty = format!("No {} found.", <P::Record as Entity>::TITLE.to_lowercase());
    let mut table = Table::new(headers).empty_message(empty);

    for record in state.items() {
        let id = record.id().unwrap_or_default();
        let mut cells: Vec<String> = schema.iter().map(|d| page.cell(record, d.field)).collect();
        cells.push(id.to_string());
        let [edit, delete] = row_actions(id);
        cells.push(format!("{} {}", edit.render(), delete.render()));
        table = table.row(cells);
    }
    table.render()
}

fn render_form<E: Entity>(state: &CrudState<E>) -> Option<String> {
    let (title, submit) = match state.modal() {
        ModalState::Closed => return None,
        ModalState::Adding => (format!("Add New {}", E::SINGULAR), format!("Add {}", E::SINGULAR)),
        ModalState::Editing { .. } => (format!("Edit {}", E::SINGULAR), format!("Update {}", E::SINGULAR)),
    };

    let mut body = Vec::new();
    if let Some(error) = state.form_error() {
        body.push(format!("! {}", error));
        body.push(String::new());
    }

    for descriptor in state.schema().iter() {
        let value = state.draft().get(descriptor.field);
        let error = state.field_errors().get(descriptor.field);
        let control = match &descriptor.options {
            Some(options) => Select::new(&descriptor.label, options.clone(), value)
                .error(error)
                .render(),
            None => Input::new(&descriptor.label, value)
                .kind(descriptor.kind.input_type())
                .error(error)
                .render(),
        };
        body.push(control);
    }

    let cancel = Button::new("Cancel")
        .variant(ButtonVariant::Secondary)
        .action("cancel");
    let submit = Button::new(submit).action("submit");
    body.push(String::new());
    body.push(format!("{}  {}", cancel.render(), submit.render()));

    Modal::new(state.modal().is_open(), title, body.join("\n")).render()
}
