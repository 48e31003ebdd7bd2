//! # Commodity Lookup
//!
//! The inventory screen needs the commodity list before it can show anything:
//! it supplies the options of the product selection and turns product ids
//! back into names in the table. The list is fetched on every mount and
//! never cached.
//!
//! ```text
//! Loading ──fetch ok──► Ready(lookup) ──► inventory controller mounts
//!    │
//!    └──fetch err──► Failed(message)      controller never mounts
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};
use wms_core::{Commodity, Entity, InventoryField, InventoryItem, Schema};

use crate::api::{decode_list, Backend};
use crate::error::{ClientError, ClientResult};
use crate::lifetime::LifetimeToken;

/// Shown in place of a product whose id is not in the lookup.
pub const UNKNOWN_PRODUCT: &str = "N/A";

/// Commodities by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommodityLookup {
    commodities: Vec<Commodity>,
    names: HashMap<String, String>,
}

impl CommodityLookup {
    pub fn new(commodities: Vec<Commodity>) -> Self {
        let names = commodities
            .iter()
            .filter_map(|c| c.id.as_ref().map(|id| (id.clone(), c.name.clone())))
            .collect();
        CommodityLookup { commodities, names }
    }

    pub fn commodities(&self) -> &[Commodity] {
        &self.commodities
    }

    pub fn len(&self) -> usize {
        self.commodities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }

    /// Commodity name for a product id, or `N/A`.
    pub fn name_of(&self, product_id: &str) -> &str {
        self.names
            .get(product_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_PRODUCT)
    }

    /// Inventory schema with one product option per commodity.
    pub fn inventory_schema(&self) -> Schema<InventoryField> {
        InventoryItem::schema_with_commodities(&self.commodities)
    }
}

/// Where the lookup fetch stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Loading,
    Ready(CommodityLookup),
    Failed(String),
}

impl LookupState {
    /// Text shown instead of the inventory screen, if any.
    pub fn status_line(&self) -> Option<String> {
        match self {
            LookupState::Loading => Some("Loading Inventory Lookup Data...".to_string()),
            LookupState::Ready(_) => None,
            LookupState::Failed(message) => Some(format!("Error loading lookup data: {}", message)),
        }
    }

    pub fn lookup(&self) -> Option<&CommodityLookup> {
        match self {
            LookupState::Ready(lookup) => Some(lookup),
            _ => None,
        }
    }
}

/// Fetches the commodity list for the inventory screen.
///
/// Failures become [`LookupState::Failed`]; only cancellation is an `Err`.
pub async fn load_commodities<B>(backend: &B, token: &LifetimeToken) -> ClientResult<LookupState>
where
    B: Backend + ?Sized,
{
    if token.is_cancelled() {
        return Err(ClientError::Cancelled);
    }

    let result = token
        .run(backend.list(Commodity::RESOURCE))
        .await
        .and_then(decode_list::<Commodity>);

    match result {
        Ok(list) => {
            let lookup = CommodityLookup::new(list.unwrap_or_default());
            debug!(count = lookup.len(), "Commodity lookup loaded");
            Ok(LookupState::Ready(lookup))
        }
        Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
        Err(e) => {
            warn!(error = %e, "Commodity lookup failed");
            Ok(LookupState::Failed(e.to_string()))
        }
    }
}
