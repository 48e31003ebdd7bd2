//! # Button
//!
//! ## Styles
//! ```text
//!   variant        md              sm          lg
//!   ───────────    ───────────     ─────────   ─────────────
//!   primary        [ Save ]        [Save]      [  Save  ]
//!   outline        ( Save )        (Save)      (  Save  )
//!   destructive    < Save >        <Save>      <  Save  >
//!   secondary      { Save }        {Save}      {  Save  }
//!   ghost            Save           Save          Save
//! ```
//! `icon` size renders the label with no padding at all.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Destructive,
    Secondary,
    Ghost,
}

impl ButtonVariant {
    /// Parses a variant name. Unknown names fall back to `Primary`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "outline" => ButtonVariant::Outline,
            "destructive" => ButtonVariant::Destructive,
            "secondary" => ButtonVariant::Secondary,
            "ghost" => ButtonVariant::Ghost,
            _ => ButtonVariant::Primary,
        }
    }

    fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            ButtonVariant::Primary => ("[", "]"),
            ButtonVariant::Outline => ("(", ")"),
            ButtonVariant::Destructive => ("<", ">"),
            ButtonVariant::Secondary => ("{", "}"),
            ButtonVariant::Ghost => (" ", " "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
    Icon,
}

impl ButtonSize {
    /// Parses a size name. Unknown names fall back to `Md`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "sm" => ButtonSize::Sm,
            "lg" => ButtonSize::Lg,
            "icon" => ButtonSize::Icon,
            _ => ButtonSize::Md,
        }
    }

    fn padding(self) -> usize {
        match self {
            ButtonSize::Sm | ButtonSize::Icon => 0,
            ButtonSize::Md => 1,
            ButtonSize::Lg => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Button {
    pub label: String,
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    /// Command that activates the button.
    pub action: Option<String>,
    /// Extra attributes passed through untouched (`title`, ...).
    pub attrs: BTreeMap<String, String>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Button {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn render(&self) -> String {
        let (open, close) = self.variant.delimiters();
        let pad = " ".repeat(self.size.padding());
        format!("{open}{pad}{}{pad}{close}", self.label)
    }
}
