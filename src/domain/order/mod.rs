//! Order domain — the accumulated order record and its line items.

pub mod details;
pub mod pricing;
pub mod summary;

use crate::domain::catalog::MenuCatalogEntry;
use crate::shared::{CityId, MenuItemId, Won};
use serde::{Deserialize, Serialize};

pub use details::{AddressImage, DeliveryDetails, DetailsValidationError};
pub use summary::{OrderNumber, OrderNumberScheme, OrderSummary};

// ─── OrderedItem ─────────────────────────────────────────────────────────────

/// A line of a placed order.
///
/// Holds a copy of the catalog fields taken when the menu step completed, so a
/// later catalog change never alters an order already on record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedItem {
    pub id: MenuItemId,
    pub name: String,
    pub localized_name: String,
    pub unit_price: Won,
    pub quantity: u32,
}

impl OrderedItem {
    pub fn from_entry(entry: &MenuCatalogEntry, quantity: u32) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            localized_name: entry.localized_name.clone(),
            unit_price: entry.unit_price,
            quantity,
        }
    }

    pub fn line_total(&self) -> Won {
        self.unit_price.times(self.quantity)
    }
}

// ─── OrderRecord ─────────────────────────────────────────────────────────────

/// Everything collected across the ordering steps.
///
/// Only the order flow mutates a record; screens see it read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub city: CityId,
    pub items: Vec<OrderedItem>,
    pub delivery_address: String,
    pub wechat_id: String,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_image: Option<AddressImage>,
}

impl OrderRecord {
    /// A fresh record: default city, no items, empty details.
    pub fn new(default_city: CityId) -> Self {
        Self {
            city: default_city,
            items: Vec::new(),
            delivery_address: String::new(),
            wechat_id: String::new(),
            note: String::new(),
            address_image: None,
        }
    }

    pub fn subtotal(&self) -> Won {
        pricing::subtotal(self.items.iter().map(|i| (i.unit_price, i.quantity)))
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub(crate) fn apply_details(&mut self, details: DeliveryDetails) {
        self.delivery_address = details.delivery_address;
        self.wechat_id = details.wechat_id;
        self.note = details.note;
        self.address_image = details.address_image;
    }
}
