//! # Pages
//!
//! Each entity page is configuration over one generic view: a schema and,
//! optionally, a cell renderer. The shell talks to every page through the
//! [`Screen`] trait.
//!
//! ```text
//! pages/
//! ├── mod.rs          ◄─── Screen trait, EntityPage trait, build()
//! ├── view.rs         ◄─── EntityView<P>: controller + rendering
//! ├── dashboard.rs    ◄─── landing page
//! ├── customers.rs    ◄─── full name in the first-name column
//! ├── warehouses.rs
//! ├── commodities.rs
//! └── inventory.rs    ◄─── commodity lookup before the controller mounts
//! ```
//!
//! Building a screen never touches the network. A screen that fetches on
//! entry reports [`Screen::needs_mount`] and the shell awaits
//! [`Screen::mount`] separately, so the loading frame can be drawn first.

mod commodities;
mod customers;
mod dashboard;
mod inventory;
mod view;
mod warehouses;

use std::sync::Arc;

use async_trait::async_trait;
use wms_client::{Backend, LifetimeToken, MutationOutcome};
use wms_core::{Entity, Schema};

use crate::error::{AppError, AppResult};
use crate::shell::Page;

pub use commodities::CommoditiesPage;
pub use customers::CustomersPage;
pub use dashboard::{DashboardScreen, START_ACTION, WELCOME_TEXT, WELCOME_TITLE};
pub use inventory::{InventoryPage, InventoryScreen};
pub use view::{render_entity, EntityView};
pub use warehouses::WarehousesPage;

/// Static configuration of one entity page.
pub trait EntityPage: Send + Sync + 'static {
    type Record: Entity;

    fn page(&self) -> Page;

    fn schema(&self) -> Schema<<Self::Record as Entity>::Field>;

    /// Displayed value of one table cell. Defaults to the raw field text.
    fn cell(&self, record: &Self::Record, field: <Self::Record as Entity>::Field) -> String {
        record.field_text(field)
    }
}

/// A mounted page as the shell sees it.
///
/// Actions a page does not support report [`AppError::NotAvailable`].
#[async_trait]
pub trait Screen: Send {
    fn page(&self) -> Page;

    fn render(&self) -> String;

    /// Whether [`Screen::mount`] must run before the page is usable.
    fn needs_mount(&self) -> bool {
        false
    }

    /// Initial fetch after the screen is built.
    async fn mount(&mut self) -> AppResult<()> {
        Ok(())
    }

    async fn reload(&mut self) -> AppResult<()> {
        Err(AppError::not_available("reload", self.page().label()))
    }

    fn open_add(&mut self) -> AppResult<()> {
        Err(AppError::not_available("add", self.page().label()))
    }

    fn open_edit(&mut self, _id: &str) -> AppResult<()> {
        Err(AppError::not_available("edit", self.page().label()))
    }

    fn set_field(&mut self, _name: &str, _value: &str) -> AppResult<()> {
        Err(AppError::not_available("set", self.page().label()))
    }

    fn cancel(&mut self) -> AppResult<()> {
        Err(AppError::not_available("cancel", self.page().label()))
    }

    async fn submit(&mut self) -> AppResult<MutationOutcome> {
        Err(AppError::not_available("submit", self.page().label()))
    }

    /// Confirmation text for deleting `id`; fails if `id` cannot be deleted.
    fn delete_prompt(&self, _id: &str) -> AppResult<String> {
        Err(AppError::not_available("delete", self.page().label()))
    }

    async fn delete(&mut self, _id: &str) -> AppResult<MutationOutcome> {
        Err(AppError::not_available("delete", self.page().label()))
    }
}

/// Builds the screen for `page` in its loading state.
pub fn build(page: Page, backend: Arc<dyn Backend>, token: LifetimeToken) -> Box<dyn Screen> {
    let screen: Box<dyn Screen> = match page {
        Page::Dashboard => Box::new(DashboardScreen),
        Page::Customers => Box::new(EntityView::new(CustomersPage, backend, token)),
        Page::Warehouses => Box::new(EntityView::new(WarehousesPage, backend, token)),
        Page::Commodities => Box::new(EntityView::new(CommoditiesPage, backend, token)),
        Page::Inventory => Box::new(InventoryScreen::new(backend, token)),
    };
    screen
}
