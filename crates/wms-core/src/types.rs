//! # Domain Types
//!
//! The four records the backend serves, and the `Entity` trait that lets one
//! generic controller handle all of them.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │    Warehouse    │   │    Commodity    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  firstName      │   │  name           │   │  name           │       │
//! │  │  lastName       │   │  location       │   │  amount (int)   │       │
//! │  │  email          │   │  storage (int)  │   └────────▲────────┘       │
//! │  │  phone          │   └─────────────────┘            │ productId      │
//! │  │  address        │                       ┌──────────┴──────────┐     │
//! │  └─────────────────┘                       │   InventoryItem     │     │
//! │                                            │  ─────────────────  │     │
//! │                                            │  id                 │     │
//! │                                            │  productId (FK)     │     │
//! │                                            │  quantity (int)     │     │
//! │                                            │  location           │     │
//! │                                            │  lastUpdated (r/o)  │     │
//! │                                            └─────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the backend and is `None` until the record exists.
//! It is never an editable field: the `*Field` enums have no `Id` variant.
//!
//! ## Lenient Numbers
//! Some backends send integers as strings. Numeric fields decode from either
//! a JSON number or a numeric string, so editing such a record still seeds
//! the form with a number.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::schema::{EntityField, FieldDescriptor, Schema, SelectOption};

// =============================================================================
// Entity Trait
// =============================================================================

/// A record type served by one REST resource.
///
/// ## Contract
/// - `RESOURCE` is the path segment under the API base (`customers`, ...)
/// - `schema()` lists every editable field, in display order
/// - `field_text` renders the raw value of a field as input text
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Typed key for the editable fields.
    type Field: EntityField;

    /// REST resource path segment.
    const RESOURCE: &'static str;

    /// Plural title, e.g. "Customers".
    const TITLE: &'static str;

    /// Singular noun, e.g. "Customer".
    const SINGULAR: &'static str;

    /// Backend-assigned identifier.
    fn id(&self) -> Option<&str>;

    /// Raw value of a field as text. Missing numbers render as "".
    fn field_text(&self, field: Self::Field) -> String;

    /// Default editable schema.
    fn schema() -> Schema<Self::Field>;
}

// =============================================================================
// Lenient Decoding
// =============================================================================

mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Int(i64),
        Float(f64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    /// Integer from a number, a numeric string, `null`, or `""`.
    pub fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawNumber>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawNumber::Int(n)) => Ok(Some(n)),
            Some(RawNumber::Float(f)) if f.fract() == 0.0 => Ok(Some(f as i64)),
            Some(RawNumber::Float(f)) => Err(D::Error::custom(format!("{} is not an integer", f))),
            Some(RawNumber::Text(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("'{}' is not an integer", s)))
            }
        }
    }

    /// Identifier from a string or an integer.
    pub fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawId>::deserialize(deserializer)? {
            None => None,
            Some(RawId::Text(s)) if s.is_empty() => None,
            Some(RawId::Text(s)) => Some(s),
            Some(RawId::Int(n)) => Some(n.to_string()),
        })
    }

    /// String that may arrive as `null`.
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}

fn int_text(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

// =============================================================================
// Customer
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
}

impl EntityField for CustomerField {
    fn name(self) -> &'static str {
        match self {
            CustomerField::FirstName => "firstName",
            CustomerField::LastName => "lastName",
            CustomerField::Email => "email",
            CustomerField::Phone => "phone",
            CustomerField::Address => "address",
        }
    }
}

impl Customer {
    /// "First Last", as shown in the customer table.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Customer {
    type Field = CustomerField;
    const RESOURCE: &'static str = "customers";
    const TITLE: &'static str = "Customers";
    const SINGULAR: &'static str = "Customer";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field_text(&self, field: CustomerField) -> String {
        match field {
            CustomerField::FirstName => self.first_name.clone(),
            CustomerField::LastName => self.last_name.clone(),
            CustomerField::Email => self.email.clone(),
            CustomerField::Phone => self.phone.clone(),
            CustomerField::Address => self.address.clone(),
        }
    }

    fn schema() -> Schema<CustomerField> {
        Schema::new(vec![
            FieldDescriptor::text(CustomerField::FirstName, "First Name"),
            FieldDescriptor::text(CustomerField::LastName, "Last Name"),
            FieldDescriptor::email(CustomerField::Email, "Email"),
            FieldDescriptor::text(CustomerField::Phone, "Phone"),
            FieldDescriptor::text(CustomerField::Address, "Address"),
        ])
    }
}

// =============================================================================
// Warehouse
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,
    /// Capacity in storage units.
    #[serde(default, deserialize_with = "lenient::int")]
    pub storage: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarehouseField {
    Name,
    Location,
    Storage,
}

impl EntityField for WarehouseField {
    fn name(self) -> &'static str {
        match self {
            WarehouseField::Name => "name",
            WarehouseField::Location => "location",
            WarehouseField::Storage => "storage",
        }
    }
}

impl Entity for Warehouse {
    type Field = WarehouseField;
    const RESOURCE: &'static str = "warehouses";
    const TITLE: &'static str = "Warehouses";
    const SINGULAR: &'static str = "Warehouse";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field_text(&self, field: WarehouseField) -> String {
        match field {
            WarehouseField::Name => self.name.clone(),
            WarehouseField::Location => self.location.clone(),
            WarehouseField::Storage => int_text(self.storage),
        }
    }

    fn schema() -> Schema<WarehouseField> {
        Schema::new(vec![
            FieldDescriptor::text(WarehouseField::Name, "Name"),
            FieldDescriptor::text(WarehouseField::Location, "Location"),
            FieldDescriptor::number(WarehouseField::Storage, "Storage (capacity)"),
        ])
    }
}

// =============================================================================
// Commodity
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commodity {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Quantity on hand.
    #[serde(default, deserialize_with = "lenient::int")]
    pub amount: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommodityField {
    Name,
    Amount,
}

impl EntityField for CommodityField {
    fn name(self) -> &'static str {
        match self {
            CommodityField::Name => "name",
            CommodityField::Amount => "amount",
        }
    }
}

impl Entity for Commodity {
    type Field = CommodityField;
    const RESOURCE: &'static str = "commodities";
    const TITLE: &'static str = "Commodities";
    const SINGULAR: &'static str = "Commodity";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field_text(&self, field: CommodityField) -> String {
        match field {
            CommodityField::Name => self.name.clone(),
            CommodityField::Amount => int_text(self.amount),
        }
    }

    fn schema() -> Schema<CommodityField> {
        Schema::new(vec![
            FieldDescriptor::text(CommodityField::Name, "Name"),
            FieldDescriptor::number(CommodityField::Amount, "Amount (quantity)"),
        ])
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Stock of one commodity at one location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Commodity id.
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_id: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,
    /// Set by the backend; never sent.
    #[serde(default, skip_serializing)]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryField {
    ProductId,
    Quantity,
    Location,
}

impl EntityField for InventoryField {
    fn name(self) -> &'static str {
        match self {
            InventoryField::ProductId => "productId",
            InventoryField::Quantity => "quantity",
            InventoryField::Location => "location",
        }
    }
}

impl InventoryItem {
    /// Inventory schema whose product field selects among `commodities`.
    ///
    /// Commodities without an id cannot be referenced and are skipped.
    pub fn schema_with_commodities(commodities: &[Commodity]) -> Schema<InventoryField> {
        let options = commodities
            .iter()
            .filter_map(|c| c.id.as_ref().map(|id| SelectOption::new(id.clone(), c.name.clone())))
            .collect();

        Schema::new(vec![
            FieldDescriptor::text(InventoryField::ProductId, "Product (Commodity)")
                .with_options(options),
            FieldDescriptor::number(InventoryField::Quantity, "Quantity"),
            FieldDescriptor::text(InventoryField::Location, "Location"),
        ])
    }
}

impl Entity for InventoryItem {
    type Field = InventoryField;
    const RESOURCE: &'static str = "inventory";
    const TITLE: &'static str = "Inventory";
    const SINGULAR: &'static str = "Inventory Item";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field_text(&self, field: InventoryField) -> String {
        match field {
            InventoryField::ProductId => self.product_id.clone(),
            InventoryField::Quantity => int_text(self.quantity),
            InventoryField::Location => self.location.clone(),
        }
    }

    fn schema() -> Schema<InventoryField> {
        Self::schema_with_commodities(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_string_decodes_as_integer() {
        let w: Warehouse =
            serde_json::from_str(r#"{"id":"w1","name":"North","location":"Oslo","storage":"42"}"#)
                .unwrap();
        assert_eq!(w.storage, Some(42));
        assert_eq!(w.field_text(WarehouseField::Storage), "42");
    }

    #[test]
    fn test_null_and_missing_fields_decode() {
        let c: Commodity = serde_json::from_str(r#"{"id":7,"name":null}"#).unwrap();
        assert_eq!(c.id.as_deref(), Some("7"));
        assert_eq!(c.name, "");
        assert_eq!(c.amount, None);
        assert_eq!(c.field_text(CommodityField::Amount), "");
    }

    #[test]
    fn test_fractional_number_is_rejected() {
        let result: Result<Commodity, _> = serde_json::from_str(r#"{"amount":1.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_inventory_decodes_timestamp_and_skips_it_on_encode() {
        let item: InventoryItem = serde_json::from_str(
            r#"{"id":"i1","productId":"c1","quantity":3,"location":"A1","lastUpdated":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(item.last_updated.is_some());

        let encoded = serde_json::to_value(&item).unwrap();
        assert!(encoded.get("lastUpdated").is_none());
        assert_eq!(encoded["productId"], "c1");
    }

    #[test]
    fn test_inventory_schema_options_come_from_commodities() {
        let commodities = vec![
            Commodity {
                id: Some("c1".into()),
                name: "Rice".into(),
                amount: Some(10),
            },
            Commodity {
                id: None,
                name: "Unsaved".into(),
                amount: None,
            },
        ];
        let schema = InventoryItem::schema_with_commodities(&commodities);
        let product = schema.get(InventoryField::ProductId).unwrap();
        assert_eq!(
            product.options.as_deref(),
            Some(&[SelectOption::new("c1", "Rice")][..])
        );
    }

    #[test]
    fn test_schemas_use_wire_names() {
        assert_eq!(
            Customer::schema().names(),
            vec!["firstName", "lastName", "email", "phone", "address"]
        );
        assert_eq!(Warehouse::schema().names(), vec!["name", "location", "storage"]);
        assert_eq!(Commodity::schema().names(), vec!["name", "amount"]);
        assert_eq!(
            InventoryItem::schema().names(),
            vec!["productId", "quantity", "location"]
        );
    }

    #[test]
    fn test_customer_full_name() {
        let c = Customer {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            ..Default::default()
        };
        assert_eq!(c.full_name(), "Ada Lovelace");
    }
}
