//! # Presentational Primitives
//!
//! Stateless building blocks that turn props into text. None of them know
//! about entities or the backend; the pages assemble them.
//!
//! ```text
//! ui/
//! ├── button.rs  ◄─── variant × size, action id, attributes
//! ├── input.rs   ◄─── labelled text input with error line
//! ├── select.rs  ◄─── labelled bounded choice, "Select an option" first
//! ├── modal.rs   ◄─── framed dialog, nothing when hidden
//! └── table.rs   ◄─── headers + rows, columns fitted to content
//! ```

mod button;
mod input;
mod modal;
mod select;
mod table;

pub use button::{Button, ButtonSize, ButtonVariant};
pub use input::Input;
pub use modal::Modal;
pub use select::{Select, PLACEHOLDER_OPTION};
pub use table::Table;

/// Display width of a string, counted in chars.
pub(crate) fn width(text: &str) -> usize {
    text.chars().count()
}

/// Left-aligns `text` in a field of `width` chars.
pub(crate) fn pad(text: &str, target: usize) -> String {
    let mut out = String::from(text);
    for _ in width(text)..target {
        out.push(' ');
    }
    out
}
