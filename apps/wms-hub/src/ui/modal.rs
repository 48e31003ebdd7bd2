//! # Modal
//!
//! ```text
//! ┌─ Add New Customer ───────────── [x] ┐
//! │ First Name                          │
//! │   > <Enter first name>              │
//! └─────────────────────────────────────┘
//! ```
//! A hidden modal renders nothing at all.

use super::{pad, width};

/// Command that closes the dialog.
pub const CLOSE_ACTION: &str = "cancel";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modal {
    pub show: bool,
    pub title: String,
    pub body: String,
}

impl Modal {
    pub fn new(show: bool, title: impl Into<String>, body: impl Into<String>) -> Self {
        Modal {
            show,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn close_action(&self) -> &'static str {
        CLOSE_ACTION
    }

    pub fn render(&self) -> Option<String> {
        if !self.show {
            return None;
        }

        let close = "[x]";
        let body_width = self.body.lines().map(width).max().unwrap_or(0);
        // "─ " + title + " " + gap + " " + close
        let inner = body_width.max(width(&self.title) + width(close) + 4) + 2;

        let head = format!("─ {} ", self.title);
        let gap = inner - width(&head) - width(close) - 1;
        let mut out = format!("┌{}{} {}┐\n", head, "─".repeat(gap), close);
        for line in self.body.lines() {
            out.push_str(&format!("│ {} │\n", pad(line, inner - 2)));
        }
        out.push_str(&format!("└{}┘", "─".repeat(inner)));
        Some(out)
    }
}
