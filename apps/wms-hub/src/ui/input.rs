//! # Text Input
//!
//! ```text
//! Email (email)
//!   > ada@example.com
//!   ! Email is required.
//! ```
//! An empty value shows the placeholder in angle brackets.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Input {
    pub label: String,
    /// Input type (`text`, `email`, `number`).
    pub kind: String,
    pub value: String,
    pub placeholder: String,
    pub error: Option<String>,
}

impl Input {
    /// A text input whose placeholder is derived from the label.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        let label = label.into();
        Input {
            placeholder: format!("Enter {}", label.to_lowercase()),
            label,
            kind: "text".to_string(),
            value: value.into(),
            error: None,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn error(mut self, error: Option<&str>) -> Self {
        self.error = error.map(str::to_string);
        self
    }

    pub fn render(&self) -> String {
        let mut out = if self.kind == "text" {
            self.label.clone()
        } else {
            format!("{} ({})", self.label, self.kind)
        };
        if self.value.is_empty() {
            out.push_str(&format!("\n  > <{}>", self.placeholder));
        } else {
            out.push_str(&format!("\n  > {}", self.value));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("\n  ! {}", error));
        }
        out
    }
}
