//! Customers page.

use wms_core::{Customer, CustomerField, Entity, Schema};

use super::EntityPage;
use crate::shell::Page;

/// Shows "First Last" in the first-name column and leaves the last-name
/// column blank. Records and schema are untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomersPage;

impl EntityPage for CustomersPage {
    type Record = Customer;

    fn page(&self) -> Page {
        Page::Customers
    }

    fn schema(&self) -> Schema<CustomerField> {
        Customer::schema()
    }

    fn cell(&self, record: &Customer, field: CustomerField) -> String {
        match field {
            CustomerField::FirstName => record.full_name(),
            CustomerField::LastName => String::new(),
            other => record.field_text(other),
        }
    }
}
