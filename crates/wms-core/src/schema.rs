//! # Field Schemas
//!
//! A schema is the ordered list of editable fields for one entity. It drives
//! three things at once: the table columns, the form controls, and the
//! validation/coercion rules applied on submit.
//!
//! ```text
//! Schema<CustomerField>
//!   ├── FieldDescriptor { FirstName, "First Name", Text }
//!   ├── FieldDescriptor { LastName,  "Last Name",  Text }
//!   ├── FieldDescriptor { Email,     "Email",      Email }
//!   └── ...
//! ```
//!
//! The identifying field never appears here: entity field enums have no
//! `Id` variant, so a schema cannot name it.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A typed key for one editable field of an entity.
///
/// Implemented by small `Copy` enums, one per entity. `name()` is the JSON key
/// the backend uses.
pub trait EntityField: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// JSON key on the wire (camelCase).
    fn name(self) -> &'static str;
}

// =============================================================================
// Field Kind
// =============================================================================

/// How a field is edited and coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text, sent as a string.
    #[default]
    Text,
    /// Free text holding an e-mail address, sent as a string.
    Email,
    /// Integer input, sent as a JSON number (or `null` when empty).
    Number,
}

impl FieldKind {
    /// Returns the input type attribute for this kind.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Number => "number",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Number)
    }
}

// =============================================================================
// Select Options
// =============================================================================

/// One entry of a bounded selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

// =============================================================================
// Field Descriptor
// =============================================================================

/// Describes one editable field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor<F> {
    pub field: F,
    pub label: String,
    pub kind: FieldKind,
    /// When present the field is a selection instead of free text.
    pub options: Option<Vec<SelectOption>>,
    /// Exempts the field from the required-value rule.
    pub optional: bool,
}

impl<F: EntityField> FieldDescriptor<F> {
    fn with_kind(field: F, label: impl Into<String>, kind: FieldKind) -> Self {
        FieldDescriptor {
            field,
            label: label.into(),
            kind,
            options: None,
            optional: false,
        }
    }

    /// A required free-text field.
    pub fn text(field: F, label: impl Into<String>) -> Self {
        Self::with_kind(field, label, FieldKind::Text)
    }

    /// A required e-mail field.
    pub fn email(field: F, label: impl Into<String>) -> Self {
        Self::with_kind(field, label, FieldKind::Email)
    }

    /// A required integer field.
    pub fn number(field: F, label: impl Into<String>) -> Self {
        Self::with_kind(field, label, FieldKind::Number)
    }

    /// Marks the field optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Turns the field into a bounded selection.
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// JSON key of the field.
    pub fn name(&self) -> &'static str {
        self.field.name()
    }

    pub fn is_select(&self) -> bool {
        self.options.is_some()
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Ordered, duplicate-free list of field descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema<F> {
    fields: Vec<FieldDescriptor<F>>,
}

impl<F: EntityField> Schema<F> {
    /// Builds a schema. A field listed twice keeps its first descriptor.
    pub fn new(descriptors: Vec<FieldDescriptor<F>>) -> Self {
        let mut fields: Vec<FieldDescriptor<F>> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if !fields.iter().any(|d| d.field == descriptor.field) {
                fields.push(descriptor);
            }
        }
        Schema { fields }
    }

    pub fn fields(&self) -> &[FieldDescriptor<F>] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<F>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the descriptor for a field, if the schema contains it.
    pub fn get(&self, field: F) -> Option<&FieldDescriptor<F>> {
        self.fields.iter().find(|d| d.field == field)
    }

    pub fn contains(&self, field: F) -> bool {
        self.get(field).is_some()
    }

    /// Looks a field up by its JSON key, case-insensitively.
    ///
    /// Used by text front-ends where the user types the field name.
    pub fn find_by_name(&self, name: &str) -> Option<&FieldDescriptor<F>> {
        self.fields
            .iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }

    /// JSON keys in schema order.
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|d| d.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestField {
        Name,
        Count,
    }

    impl EntityField for TestField {
        fn name(self) -> &'static str {
            match self {
                TestField::Name => "name",
                TestField::Count => "count",
            }
        }
    }

    #[test]
    fn test_duplicate_fields_keep_first() {
        let schema = Schema::new(vec![
            FieldDescriptor::text(TestField::Name, "Name"),
            FieldDescriptor::number(TestField::Count, "Count"),
            FieldDescriptor::number(TestField::Name, "Other"),
        ]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get(TestField::Name).map(|d| d.label.as_str()), Some("Name"));
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let schema = Schema::new(vec![FieldDescriptor::number(TestField::Count, "Count")]);
        assert!(schema.find_by_name("COUNT").is_some());
        assert!(schema.find_by_name("name").is_none());
    }

    #[test]
    fn test_descriptor_builders() {
        let d = FieldDescriptor::text(TestField::Name, "Name")
            .optional()
            .with_options(vec![SelectOption::new("1", "One")]);
        assert!(d.optional);
        assert!(d.is_select());
        assert_eq!(d.kind.input_type(), "text");
        assert!(FieldKind::Number.is_numeric());
    }
}
