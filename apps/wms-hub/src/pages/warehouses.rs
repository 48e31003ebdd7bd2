//! Warehouses page.

use wms_core::{Entity, Schema, Warehouse, WarehouseField};

use super::EntityPage;
use crate::shell::Page;

#[derive(Debug, Clone, Copy, Default)]
pub struct WarehousesPage;

impl EntityPage for WarehousesPage {
    type Record = Warehouse;

    fn page(&self) -> Page {
        Page::Warehouses
    }

    fn schema(&self) -> Schema<WarehouseField> {
        Warehouse::schema()
    }
}
