//! # Form State
//!
//! The editable draft behind the add/edit modal, its per-field error map, and
//! the coercion that turns a valid draft into a request body.
//!
//! ## Draft Lifecycle
//! ```text
//! open add  ──► Draft::empty(schema)        every field ""
//! open edit ──► Draft::from_record(schema)  numbers as decimal text
//! typing    ──► draft.set(field, text)
//! submit    ──► prepare_payload(schema, draft)
//!                 ├── Err(FieldErrors)  → shown inline, nothing sent
//!                 └── Ok(Payload)       → exactly the schema's keys
//! ```
//!
//! ## Coercion
//! | kind           | text   | JSON    |
//! |----------------|--------|---------|
//! | Number         | "42"   | 42      |
//! | Number         | ""     | null    |
//! | Text / Email   | ""     | ""      |
//! | Text / Email   | "abc"  | "abc"   |

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::schema::{EntityField, Schema};
use crate::types::Entity;
use crate::validation::{parse_integer, validate_draft};

/// JSON object sent as a create/update body.
pub type Payload = Map<String, Value>;

// =============================================================================
// Draft
// =============================================================================

/// Input text for every field of a schema, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft<F> {
    values: Vec<(F, String)>,
}

impl<F: EntityField> Draft<F> {
    /// A draft with every schema field empty.
    pub fn empty(schema: &Schema<F>) -> Self {
        Draft {
            values: schema.iter().map(|d| (d.field, String::new())).collect(),
        }
    }

    /// A draft seeded from an existing record.
    pub fn from_record<E>(schema: &Schema<F>, record: &E) -> Self
    where
        E: Entity<Field = F>,
    {
        Draft {
            values: schema
                .iter()
                .map(|d| (d.field, record.field_text(d.field)))
                .collect(),
        }
    }

    /// Current text of a field ("" when absent).
    pub fn get(&self, field: F) -> &str {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Replaces the text of a field.
    ///
    /// Only schema fields can be set, which keeps the draft's field set equal
    /// to the schema's.
    pub fn set(&mut self, field: F, text: impl Into<String>) -> CoreResult<()> {
        match self.values.iter_mut().find(|(f, _)| *f == field) {
            Some((_, value)) => {
                *value = text.into();
                Ok(())
            }
            None => Err(CoreError::UnknownField(field.name().to_string())),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.values.iter().map(|(f, _)| *f)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Field → message map shown beside the form inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: EntityField> {
    messages: HashMap<F, String>,
}

impl<F: EntityField> Default for FieldErrors<F> {
    fn default() -> Self {
        FieldErrors {
            messages: HashMap::new(),
        }
    }
}

impl<F: EntityField> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: F, message: impl Into<String>) {
        self.messages.insert(field, message.into());
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    /// Drops the error of one field (on edit of that field).
    pub fn clear_field(&mut self, field: F) {
        self.messages.remove(&field);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.messages.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

// =============================================================================
// Coercion
// =============================================================================

/// Validates a draft and builds the request body.
///
/// The body holds exactly the schema's field names.
pub fn prepare_payload<F: EntityField>(
    schema: &Schema<F>,
    draft: &Draft<F>,
) -> Result<Payload, FieldErrors<F>> {
    let errors = validate_draft(schema, draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut body = Payload::new();
    for descriptor in schema.iter() {
        let text = draft.get(descriptor.field);
        let value = if descriptor.kind.is_numeric() {
            match parse_integer(text) {
                Ok(Some(n)) => Value::from(n),
                Ok(None) => Value::Null,
                // Unreachable after validation; keep the error rather than guess.
                Err(_) => {
                    let mut errors = FieldErrors::new();
                    errors.set(
                        descriptor.field,
                        ValidationError::NotANumber {
                            label: descriptor.label.clone(),
                        }
                        .to_string(),
                    );
                    return Err(errors);
                }
            }
        } else {
            Value::String(text.to_string())
        };
        body.insert(descriptor.name().to_string(), value);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use crate::types::{Commodity, CommodityField, Customer, CustomerField, Warehouse, WarehouseField};
    use serde_json::json;

    #[test]
    fn test_empty_draft_mirrors_schema() {
        let schema = Customer::schema();
        let draft = Draft::empty(&schema);
        assert_eq!(draft.len(), schema.len());
        assert!(draft.fields().all(|f| schema.contains(f)));
        assert_eq!(draft.get(CustomerField::Email), "");
    }

    #[test]
    fn test_set_rejects_fields_outside_schema() {
        let schema = Schema::new(vec![FieldDescriptor::text(CommodityField::Name, "Name")]);
        let mut draft = Draft::empty(&schema);
        assert!(draft.set(CommodityField::Name, "Rice").is_ok());
        assert_eq!(
            draft.set(CommodityField::Amount, "3"),
            Err(CoreError::UnknownField("amount".to_string()))
        );
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_from_record_renders_numbers_as_text() {
        let schema = Warehouse::schema();
        let w = Warehouse {
            id: Some("w1".into()),
            name: "North".into(),
            location: "Oslo".into(),
            storage: Some(500),
        };
        let draft = Draft::from_record(&schema, &w);
        assert_eq!(draft.get(WarehouseField::Storage), "500");
        assert_eq!(draft.len(), 3);
    }

    #[test]
    fn test_numeric_text_is_sent_as_integer() {
        let schema = Commodity::schema();
        let mut draft = Draft::empty(&schema);
        draft.set(CommodityField::Name, "Rice").unwrap();
        draft.set(CommodityField::Amount, "42").unwrap();

        let body = prepare_payload(&schema, &draft).unwrap();
        assert_eq!(serde_json::Value::Object(body), json!({"name": "Rice", "amount": 42}));
    }

    #[test]
    fn test_empty_optional_number_is_null_not_zero() {
        let schema = Schema::new(vec![
            FieldDescriptor::text(CommodityField::Name, "Name"),
            FieldDescriptor::number(CommodityField::Amount, "Amount (quantity)").optional(),
        ]);
        let mut draft = Draft::empty(&schema);
        draft.set(CommodityField::Name, "Rice").unwrap();

        let body = prepare_payload(&schema, &draft).unwrap();
        assert_eq!(body.get("amount"), Some(&Value::Null));
    }

    #[test]
    fn test_empty_optional_text_is_preserved() {
        let schema = Schema::new(vec![
            FieldDescriptor::text(CustomerField::FirstName, "First Name"),
            FieldDescriptor::text(CustomerField::Phone, "Phone").optional(),
        ]);
        let mut draft = Draft::empty(&schema);
        draft.set(CustomerField::FirstName, "Ada").unwrap();

        let body = prepare_payload(&schema, &draft).unwrap();
        assert_eq!(body.get("phone"), Some(&Value::String(String::new())));
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn test_invalid_draft_returns_errors() {
        let schema = Commodity::schema();
        let mut draft = Draft::empty(&schema);
        draft.set(CommodityField::Name, "Rice").unwrap();
        draft.set(CommodityField::Amount, "many").unwrap();

        let errors = prepare_payload(&schema, &draft).unwrap_err();
        assert_eq!(
            errors.get(CommodityField::Amount),
            Some("Amount (quantity) must be a valid number.")
        );
        assert_eq!(errors.get(CommodityField::Name), None);
    }
}
