//! Landing page.

use async_trait::async_trait;

use super::Screen;
use crate::shell::Page;
use crate::ui::{Button, ButtonSize};

pub const WELCOME_TITLE: &str = "Welcome to Warehouse Management System";

pub const WELCOME_TEXT: &str =
    "Efficiently manage your customers, warehouses, commodities, and inventory all from one centralized dashboard.";

/// Command bound to the call-to-action button.
pub const START_ACTION: &str = "start";

#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardScreen;

#[async_trait]
impl Screen for DashboardScreen {
    fn page(&self) -> Page {
        Page::Dashboard
    }

    fn render(&self) -> String {
        let start = Button::new("Start Managing Inventory")
            .size(ButtonSize::Lg)
            .action(START_ACTION);
        format!("{}\n\n{}\n\n{}", WELCOME_TITLE, WELCOME_TEXT, start.render())
    }
}
