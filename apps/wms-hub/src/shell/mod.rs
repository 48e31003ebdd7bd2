//! # Shell
//!
//! Owns the current page and its lifetime. Exactly one page is mounted at a
//! time; navigating drops the old page's [`ViewLifetime`], which cancels
//! anything it still had in flight.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ WMS Hub                                                          │
//! │ [ Dashboard ]   Customers     Warehouses     Commodities   ...   │
//! │ ──────────────────────────────────────────────────────────────── │
//! │ <current page>                                                   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commands vs. Work
//! [`Shell::handle`] never waits on the network. Anything that does
//! (mount, reload, submit, confirmed delete) is queued as pending work and
//! driven by [`Shell::run_pending`]. The input loop keeps reading while that
//! runs and ends it early through [`Shell::canceller`].
//!
//! ```text
//!   handle(go customers) ──► build screen (Loading) ──► pending = Mount
//!                                                            │
//!   run_pending() ◄──────────────────────────────────────────┘
//!        │  ◄── canceller().cancel() from the input loop ──► Cancelled
//!        ▼
//!   pending = None
//! ```

mod page;

pub use page::Page;

use std::sync::Arc;

use tracing::{debug, info};
use wms_client::{Backend, Canceller, ViewLifetime};

use crate::commands::Command;
use crate::error::{AppError, AppResult};
use crate::pages::{self, Screen};
use crate::ui::{Button, ButtonVariant};

pub const APP_TITLE: &str = "WMS Hub";

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the screen.
    Render,
    /// Ask before deleting `id`.
    Confirm { prompt: String, id: String },
    Help,
    Quit,
}

/// A backend round trip queued by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Work {
    Mount,
    Reload,
    Submit,
    Delete(String),
}

pub struct Shell {
    backend: Arc<dyn Backend>,
    lifetime: ViewLifetime,
    screen: Box<dyn Screen>,
    pending: Option<Work>,
}

impl Shell {
    /// A shell showing the dashboard.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let lifetime = ViewLifetime::new();
        let screen = pages::build(Page::Dashboard, backend.clone(), lifetime.token());
        let pending = screen.needs_mount().then_some(Work::Mount);
        Shell {
            backend,
            lifetime,
            screen,
            pending,
        }
    }

    pub fn page(&self) -> Page {
        self.screen.page()
    }

    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    /// Unmounts the current page and builds `page`. Re-selecting the
    /// current page keeps it as is.
    ///
    /// The new page's initial fetch is left pending.
    pub fn navigate(&mut self, page: Page) {
        let from = self.page();
        if from == page {
            return;
        }
        info!(%from, to = %page, "Navigating");

        self.lifetime.cancel();
        let lifetime = ViewLifetime::new();
        self.screen = pages::build(page, self.backend.clone(), lifetime.token());
        self.lifetime = lifetime;
        self.pending = self.screen.needs_mount().then_some(Work::Mount);
    }

    /// Ends the current page's lifetime from outside a running call.
    pub fn canceller(&self) -> Canceller {
        self.lifetime.canceller()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True while the current page's initial fetch has not run.
    pub fn is_mounting(&self) -> bool {
        self.pending == Some(Work::Mount)
    }

    fn queue(&mut self, work: Work) -> AppResult<()> {
        if self.pending.is_some() {
            return Err(AppError::Waiting);
        }
        debug!(?work, page = %self.page(), "Queued");
        self.pending = Some(work);
        Ok(())
    }

    pub fn nav_buttons(&self) -> Vec<Button> {
        let current = self.page();
        Page::ALL
            .into_iter()
            .map(|page| {
                let variant = if page == current {
                    ButtonVariant::Primary
                } else {
                    ButtonVariant::Ghost
                };
                Button::new(page.label())
                    .variant(variant)
                    .action(format!("go {}", page.command()))
            })
            .collect()
    }

    /// The full frame: title, nav bar, current page.
    pub fn render(&self) -> String {
        let nav: Vec<String> = self.nav_buttons().iter().map(Button::render).collect();
        let nav = nav.join(" ");
        let rule = "─".repeat(nav.chars().count());
        format!("{}\n{}\n{}\n{}", APP_TITLE, nav, rule, self.screen.render())
    }

    pub fn handle(&mut self, command: Command) -> AppResult<Reply> {
        debug!(?command, page = %self.page(), "Handling command");
        match command {
            Command::Go(page) => self.navigate(page),
            Command::Start => {
                if self.page() != Page::Dashboard {
                    return Err(AppError::not_available("start", self.page().label()));
                }
                self.navigate(Page::Inventory);
            }
            Command::Help => return Ok(Reply::Help),
            Command::Quit => return Ok(Reply::Quit),
            _ if self.pending.is_some() => return Err(AppError::Waiting),
            Command::Add => self.screen.open_add()?,
            Command::Edit(id) => self.screen.open_edit(&id)?,
            Command::Set { field, value } => self.screen.set_field(&field, &value)?,
            Command::Submit => self.queue(Work::Submit)?,
            Command::Cancel => self.screen.cancel()?,
            Command::Delete(id) => {
                let prompt = self.screen.delete_prompt(&id)?;
                return Ok(Reply::Confirm { prompt, id });
            }
            Command::Reload => self.queue(Work::Reload)?,
        }
        Ok(Reply::Render)
    }

    /// Queues a delete the user has confirmed.
    pub fn confirm_delete(&mut self, id: impl Into<String>) -> AppResult<()> {
        self.queue(Work::Delete(id.into()))
    }

    /// Runs the queued backend work, if any, to completion or cancellation.
    pub async fn run_pending(&mut self) -> AppResult<()> {
        let Some(work) = self.pending.take() else {
            return Ok(());
        };
        match work {
            Work::Mount => self.screen.mount().await,
            Work::Reload => self.screen.reload().await,
            Work::Submit => {
                let outcome = self.screen.submit().await?;
                debug!(?outcome, "Submit finished");
                Ok(())
            }
            Work::Delete(id) => {
                let outcome = self.screen.delete(&id).await?;
                debug!(?outcome, %id, "Delete finished");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryBackend;
    use serde_json::json;

    /// Handles `command` and runs whatever it queued.
    async fn execute(shell: &mut Shell, command: Command) -> AppResult<Reply> {
        let reply = shell.handle(command)?;
        shell.run_pending().await?;
        Ok(reply)
    }

    #[test]
    fn test_starts_on_dashboard() {
        let shell = Shell::new(MemoryBackend::new());
        assert_eq!(shell.page(), Page::Dashboard);
        assert!(!shell.has_pending());

        let out = shell.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "WMS Hub");
        assert!(lines[1].starts_with("[ Dashboard ]   Customers  "));
        assert!(out.contains("Welcome to Warehouse Management System"));
    }

    #[test]
    fn test_exactly_one_primary_nav_button() {
        let mut shell = Shell::new(MemoryBackend::new());
        shell.navigate(Page::Warehouses);

        let primary: Vec<String> = shell
            .nav_buttons()
            .into_iter()
            .filter(|b| b.variant == ButtonVariant::Primary)
            .map(|b| b.label)
            .collect();
        assert_eq!(primary, vec!["Warehouses".to_string()]);
    }

    #[tokio::test]
    async fn test_navigation_renders_loading_before_fetching() {
        let backend = MemoryBackend::with("customers", json!([]));
        let mut shell = Shell::new(backend.clone());

        shell.handle(Command::Go(Page::Customers)).unwrap();
        assert!(shell.is_mounting());
        assert!(shell.render().ends_with("Loading Customers..."));
        assert_eq!(backend.list_count("customers"), 0);

        shell.run_pending().await.unwrap();
        assert!(!shell.has_pending());
        assert!(shell.render().ends_with("No customers found."));
    }

    #[tokio::test]
    async fn test_start_goes_to_inventory_only_from_dashboard() {
        let backend = MemoryBackend::with("commodities", json!([]));
        let mut shell = Shell::new(backend.clone());

        assert_eq!(execute(&mut shell, Command::Start).await.unwrap(), Reply::Render);
        assert_eq!(shell.page(), Page::Inventory);
        assert_eq!(backend.list_count("inventory"), 1);
        assert!(matches!(
            shell.handle(Command::Start),
            Err(AppError::NotAvailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_navigation_remounts_and_refetches() {
        let backend = MemoryBackend::with("customers", json!([]));
        let mut shell = Shell::new(backend.clone());

        execute(&mut shell, Command::Go(Page::Customers)).await.unwrap();
        execute(&mut shell, Command::Go(Page::Customers)).await.unwrap();
        assert_eq!(backend.list_count("customers"), 1);

        execute(&mut shell, Command::Go(Page::Dashboard)).await.unwrap();
        execute(&mut shell, Command::Go(Page::Customers)).await.unwrap();
        assert_eq!(backend.list_count("customers"), 2);
    }

    #[tokio::test]
    async fn test_cancelled_mount_leaves_nothing_applied() {
        let backend = MemoryBackend::with("customers", json!([]));
        backend.hang("customers");
        let mut shell = Shell::new(backend.clone());
        shell.handle(Command::Go(Page::Customers)).unwrap();

        let canceller = shell.canceller();
        let (result, ()) = tokio::join!(shell.run_pending(), async { canceller.cancel() });
        assert!(result.unwrap_err().is_silent());
        assert!(shell.render().ends_with("Loading Customers..."));

        shell.handle(Command::Go(Page::Dashboard)).unwrap();
        assert!(!shell.has_pending());
        assert!(shell.render().contains("Welcome to Warehouse Management System"));
    }

    #[tokio::test]
    async fn test_commands_wait_for_pending_work() {
        let backend = MemoryBackend::with("commodities", json!([]));
        let mut shell = Shell::new(backend);
        shell.handle(Command::Go(Page::Commodities)).unwrap();

        assert!(matches!(
            shell.handle(Command::Add),
            Err(AppError::Waiting)
        ));
        assert!(matches!(
            shell.handle(Command::Reload),
            Err(AppError::Waiting)
        ));
        assert_eq!(shell.handle(Command::Help).unwrap(), Reply::Help);

        shell.run_pending().await.unwrap();
        assert_eq!(shell.handle(Command::Add).unwrap(), Reply::Render);
    }

    #[tokio::test]
    async fn test_delete_asks_first() {
        let backend = MemoryBackend::with("warehouses", json!([{"id": "w1", "name": "North", "location": "Oslo", "storage": 100}]));
        let mut shell = Shell::new(backend.clone());
        execute(&mut shell, Command::Go(Page::Warehouses)).await.unwrap();

        let reply = shell.handle(Command::Delete("w1".into())).unwrap();
        assert_eq!(
            reply,
            Reply::Confirm {
                prompt: "Are you sure you want to delete this Warehouse?".into(),
                id: "w1".into()
            }
        );
        assert_eq!(backend.list("warehouses").len(), 1);

        shell.confirm_delete("w1").unwrap();
        shell.run_pending().await.unwrap();
        assert!(backend.list("warehouses").is_empty());
        assert!(shell.render().ends_with("No warehouses found."));
    }

    #[test]
    fn test_dashboard_rejects_entity_commands() {
        let mut shell = Shell::new(MemoryBackend::new());
        let err = shell.handle(Command::Edit("x".into())).unwrap_err();
        assert_eq!(err.to_string(), "'edit' is not available on the Dashboard page");
    }
}
