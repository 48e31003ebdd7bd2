//! # Select
//!
//! ```text
//! Product (Commodity)
//!   > Rice
//!     - Select an option
//!     * c1: Rice
//!     - c2: Beans
//! ```

use wms_core::SelectOption;

/// Neutral entry listed before the real options.
pub const PLACEHOLDER_OPTION: &str = "Select an option";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Select {
    pub label: String,
    pub options: Vec<SelectOption>,
    /// Selected option value ("" for none).
    pub value: String,
    pub error: Option<String>,
}

impl Select {
    pub fn new(label: impl Into<String>, options: Vec<SelectOption>, value: impl Into<String>) -> Self {
        Select {
            label: label.into(),
            options,
            value: value.into(),
            error: None,
        }
    }

    pub fn error(mut self, error: Option<&str>) -> Self {
        self.error = error.map(str::to_string);
        self
    }

    /// Label of the selected option; the placeholder when nothing matches.
    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.value == self.value)
            .map(|o| o.label.as_str())
            .unwrap_or(PLACEHOLDER_OPTION)
    }

    pub fn render(&self) -> String {
        let mut lines = vec![self.label.clone(), format!("  > {}", self.selected_label())];

        let nothing_selected = !self.options.iter().any(|o| o.value == self.value);
        let marker = |on: bool| if on { '*' } else { '-' };
        lines.push(format!("    {} {}", marker(nothing_selected), PLACEHOLDER_OPTION));
        for option in &self.options {
            lines.push(format!(
                "    {} {}: {}",
                marker(option.value == self.value),
                option.value,
                option.label
            ));
        }

        if let Some(error) = &self.error {
            lines.push(format!("  ! {}", error));
        }
        lines.join("\n")
    }
}
