//! Commodities page.

use wms_core::{Commodity, CommodityField, Entity, Schema};

use super::EntityPage;
use crate::shell::Page;

#[derive(Debug, Clone, Copy, Default)]
pub struct CommoditiesPage;

impl EntityPage for CommoditiesPage {
    type Record = Commodity;

    fn page(&self) -> Page {
        Page::Commodities
    }

    fn schema(&self) -> Schema<CommodityField> {
        Commodity::schema()
    }
}
