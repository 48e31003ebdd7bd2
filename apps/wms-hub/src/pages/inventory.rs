//! # Inventory Page
//!
//! Inventory needs the commodity list before it can build its schema, so
//! mounting is two-staged:
//!
//! ```text
//!   mount ──► load_commodities ──┬── Failed ──► "Error loading lookup data: ..."
//!                                │              (controller never mounted)
//!                                └── Ready ───► EntityView<InventoryPage>
//!                                               product id ──► commodity name
//! ```
//! `reload` repeats both stages so new commodities show up in the select.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use wms_client::{load_commodities, Backend, CommodityLookup, LifetimeToken, LookupState, MutationOutcome};
use wms_core::{Entity, InventoryField, InventoryItem, Schema};

use super::{EntityPage, EntityView, Screen};
use crate::error::{AppError, AppResult};
use crate::shell::Page;

/// Inventory configuration over a loaded commodity lookup.
#[derive(Debug, Clone)]
pub struct InventoryPage {
    lookup: CommodityLookup,
}

impl InventoryPage {
    pub fn new(lookup: CommodityLookup) -> Self {
        InventoryPage { lookup }
    }

    pub fn lookup(&self) -> &CommodityLookup {
        &self.lookup
    }
}

impl EntityPage for InventoryPage {
    type Record = InventoryItem;

    fn page(&self) -> Page {
        Page::Inventory
    }

    fn schema(&self) -> Schema<InventoryField> {
        self.lookup.inventory_schema()
    }

    fn cell(&self, record: &InventoryItem, field: InventoryField) -> String {
        match field {
            InventoryField::ProductId => self.lookup.name_of(&record.product_id).to_string(),
            other => record.field_text(other),
        }
    }
}

pub struct InventoryScreen {
    backend: Arc<dyn Backend>,
    token: LifetimeToken,
    lookup: LookupState,
    view: Option<EntityView<InventoryPage>>,
}

impl InventoryScreen {
    pub fn new(backend: Arc<dyn Backend>, token: LifetimeToken) -> Self {
        InventoryScreen {
            backend,
            token,
            lookup: LookupState::Loading,
            view: None,
        }
    }

    async fn load(&mut self) -> AppResult<()> {
        self.view = None;
        self.lookup = LookupState::Loading;
        self.lookup = load_commodities(self.backend.as_ref(), &self.token).await?;

        if let Some(lookup) = self.lookup.lookup() {
            let page = InventoryPage::new(lookup.clone());
            let mut view = EntityView::new(page, self.backend.clone(), self.token.clone());
            view.mount().await?;
            self.view = Some(view);
        } else {
            debug!("Inventory controller not mounted without lookup data");
        }
        Ok(())
    }

    pub fn lookup_state(&self) -> &LookupState {
        &self.lookup
    }

    pub fn view(&self) -> Option<&EntityView<InventoryPage>> {
        self.view.as_ref()
    }

    fn view_mut(&mut self, action: &str) -> AppResult<&mut EntityView<InventoryPage>> {
        self.view
            .as_mut()
            .ok_or_else(|| AppError::not_available(action, Page::Inventory.label()))
    }
}

#[async_trait]
impl Screen for InventoryScreen {
    fn page(&self) -> Page {
        Page::Inventory
    }

    fn render(&self) -> String {
        if let Some(status) = self.lookup.status_line() {
            return status;
        }
        match &self.view {
            Some(view) => view.render(),
            None => format!("Loading {}...", InventoryItem::TITLE),
        }
    }

    fn needs_mount(&self) -> bool {
        true
    }

    async fn mount(&mut self) -> AppResult<()> {
        self.load().await
    }

    async fn reload(&mut self) -> AppResult<()> {
        self.load().await
    }

    fn open_add(&mut self) -> AppResult<()> {
        self.view_mut("add")?.open_add()
    }

    fn open_edit(&mut self, id: &str) -> AppResult<()> {
        self.view_mut("edit")?.open_edit(id)
    }

    fn set_field(&mut self, name: &str, value: &str) -> AppResult<()> {
        self.view_mut("set")?.set_field(name, value)
    }

    fn cancel(&mut self) -> AppResult<()> {
        self.view_mut("cancel")?.cancel()
    }

    async fn submit(&mut self) -> AppResult<MutationOutcome> {
        self.view_mut("submit")?.submit().await
    }

    fn delete_prompt(&self, id: &str) -> AppResult<String> {
        self.view
            .as_ref()
            .ok_or_else(|| AppError::not_available("delete", Page::Inventory.label()))?
            .delete_prompt(id)
    }

    async fn delete(&mut self, id: &str) -> AppResult<MutationOutcome> {
        self.view_mut("delete")?.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryBackend;
    use serde_json::json;
    use wms_client::ViewLifetime;

    async fn mounted(backend: Arc<MemoryBackend>, lifetime: &ViewLifetime) -> InventoryScreen {
        let mut screen = InventoryScreen::new(backend, lifetime.token());
        screen.mount().await.unwrap();
        screen
    }

    fn stocked() -> Arc<MemoryBackend> {
        let backend = MemoryBackend::with("commodities", json!([{"id": "c1", "name": "Rice", "amount": 10}]));
        backend.set_list(
            "inventory",
            json!([
                {"id": "i1", "productId": "c1", "quantity": 4, "location": "A1"},
                {"id": "i2", "productId": "gone", "quantity": 1, "location": "B2"}
            ]),
        );
        backend
    }

    #[tokio::test]
    async fn test_product_column_shows_commodity_name() {
        let lifetime = ViewLifetime::new();
        let screen = mounted(stocked(), &lifetime).await;

        let out = screen.render();
        assert!(out.starts_with("Inventory Management"));
        let row = |id: &str| out.lines().find(|l| l.contains(id)).unwrap().to_string();
        assert!(row("i1").starts_with("Rice "));
        assert!(row("i2").starts_with("N/A "));
    }

    #[tokio::test]
    async fn test_lookup_failure_blocks_the_controller() {
        let backend = MemoryBackend::failing("commodities", "connection refused");
        let lifetime = ViewLifetime::new();
        let mut screen = mounted(backend.clone(), &lifetime).await;

        assert_eq!(screen.render(), "Error loading lookup data: connection refused");
        assert!(screen.view().is_none());
        assert!(matches!(screen.open_add(), Err(AppError::NotAvailable { .. })));
        assert_eq!(backend.list_count("inventory"), 0);
    }

    #[tokio::test]
    async fn test_form_offers_commodities() {
        let lifetime = ViewLifetime::new();
        let mut screen = mounted(stocked(), &lifetime).await;

        screen.open_add().unwrap();
        let out = screen.render();
        assert!(out.contains("Select an option"));
        assert!(out.contains("- c1: Rice"));
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_commodities() {
        let backend = stocked();
        let lifetime = ViewLifetime::new();
        let mut screen = mounted(backend.clone(), &lifetime).await;

        backend.set_list(
            "commodities",
            json!([{"id": "c1", "name": "Rice", "amount": 10}, {"id": "c2", "name": "Beans", "amount": 3}]),
        );
        screen.reload().await.unwrap();
        screen.open_add().unwrap();
        assert!(screen.render().contains("- c2: Beans"));
        assert_eq!(backend.list_count("commodities"), 2);
    }

    #[tokio::test]
    async fn test_lookup_renders_before_the_fetch() {
        let lifetime = ViewLifetime::new();
        let screen = InventoryScreen::new(stocked(), lifetime.token());
        assert!(screen.needs_mount());
        assert_eq!(screen.render(), "Loading Inventory Lookup Data...");
    }

    #[tokio::test]
    async fn test_product_outside_the_options_is_refused() {
        let backend = stocked();
        let lifetime = ViewLifetime::new();
        let mut screen = mounted(backend.clone(), &lifetime).await;

        screen.open_add().unwrap();
        screen.set_field("productId", "bogus").unwrap();
        screen.set_field("quantity", "1").unwrap();
        screen.set_field("location", "Z9").unwrap();
        assert_eq!(screen.submit().await.unwrap(), MutationOutcome::Invalid);

        assert!(screen
            .render()
            .contains("! Product (Commodity) must be one of the listed options."));
        assert_eq!(backend.list("inventory").len(), 2);
    }
}
