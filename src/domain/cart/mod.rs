//! Cart domain — the menu step's working selection.
//!
//! The cart is a mapping from menu item id to a positive quantity. A quantity
//! that drops to zero removes the id, so the cart never holds a zero entry and
//! never materializes a zero-quantity line.

use crate::domain::catalog::Catalog;
use crate::domain::order::{pricing, OrderedItem};
use crate::shared::{MenuItemId, Won};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    quantities: HashMap<MenuItemId, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` (possibly negative) to the quantity of `id`, flooring at zero.
    ///
    /// Returns the new quantity.
    pub fn adjust_quantity(&mut self, id: &MenuItemId, delta: i32) -> u32 {
        let current = i64::from(self.quantity(id));
        let next = (current + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32;

        if next == 0 {
            self.quantities.remove(id);
        } else {
            self.quantities.insert(id.clone(), next);
        }
        next
    }

    pub fn quantity(&self, id: &MenuItemId) -> u32 {
        self.quantities.get(id).copied().unwrap_or(0)
    }

    pub fn total_item_count(&self) -> u64 {
        self.quantities.values().map(|&q| u64::from(q)).sum()
    }

    /// Ids missing from the catalog count as zero.
    pub fn subtotal(&self, catalog: &Catalog) -> Won {
        pricing::subtotal(self.quantities.iter().map(|(id, &quantity)| {
            (catalog.unit_price(id).unwrap_or(Won::ZERO), quantity)
        }))
    }

    /// Snapshot the selection as order lines, in catalog menu order.
    ///
    /// Ids missing from the catalog are skipped.
    pub fn materialize(&self, catalog: &Catalog) -> Vec<OrderedItem> {
        for id in self.quantities.keys() {
            if catalog.menu_item(id).is_none() {
                tracing::warn!("Skipping unknown menu item in cart: {}", id);
            }
        }

        catalog
            .menu()
            .iter()
            .filter_map(|entry| {
                self.quantities
                    .get(&entry.id)
                    .map(|&quantity| OrderedItem::from_entry(entry, quantity))
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Number of distinct items selected.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CityCatalogEntry, MenuCatalogEntry};
    use crate::shared::CityId;
    use proptest::prelude::*;

    fn entry(id: &str, price: u64) -> MenuCatalogEntry {
        MenuCatalogEntry {
            id: MenuItemId::from(id),
            name: format!("{id} name"),
            localized_name: format!("{id} 이름"),
            description: String::new(),
            unit_price: Won::new(price),
            image_ref: String::new(),
            tag: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![CityCatalogEntry {
                id: CityId::from("seoul"),
                name: "Seoul".to_string(),
                localized_name: "서울".to_string(),
                is_featured: true,
            }],
            vec![entry("a", 20000), entry("b", 21000), entry("c", 22000)],
        )
        .unwrap()
    }

    fn id(s: &str) -> MenuItemId {
        MenuItemId::from(s)
    }

    #[test]
    fn test_adjust_adds_and_removes() {
        let mut cart = Cart::new();
        assert_eq!(cart.adjust_quantity(&id("a"), 1), 1);
        assert_eq!(cart.adjust_quantity(&id("a"), 1), 2);
        assert_eq!(cart.adjust_quantity(&id("a"), -1), 1);
        assert_eq!(cart.adjust_quantity(&id("a"), -1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adjust_floors_at_zero() {
        let mut cart = Cart::new();
        assert_eq!(cart.adjust_quantity(&id("a"), -3), 0);
        assert!(cart.is_empty());
        cart.adjust_quantity(&id("a"), 2);
        assert_eq!(cart.adjust_quantity(&id("a"), -5), 0);
        assert_eq!(cart.quantity(&id("a")), 0);
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_subtotal_excludes_zeroed_item() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.adjust_quantity(&id("a"), 2);
        cart.adjust_quantity(&id("b"), 1);
        cart.adjust_quantity(&id("c"), 1);
        cart.adjust_quantity(&id("c"), -1);

        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.subtotal(&catalog), Won::new(2 * 20000 + 21000));
        let lines = cart.materialize(&catalog);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.id != id("c")));
    }

    #[test]
    fn test_unknown_id_contributes_zero() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.adjust_quantity(&id("a"), 1);
        cart.adjust_quantity(&id("ghost"), 4);

        assert_eq!(cart.total_item_count(), 5);
        assert_eq!(cart.subtotal(&catalog), Won::new(20000));
        let lines = cart.materialize(&catalog);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, id("a"));
    }

    #[test]
    fn test_materialize_follows_menu_order_and_snapshots_fields() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.adjust_quantity(&id("c"), 1);
        cart.adjust_quantity(&id("a"), 3);

        let lines = cart.materialize(&catalog);
        let ids: Vec<_> = lines.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(lines[0].name, "a name");
        assert_eq!(lines[0].localized_name, "a 이름");
        assert_eq!(lines[0].unit_price, Won::new(20000));
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn test_materialized_lines_survive_catalog_reprice() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.adjust_quantity(&id("a"), 1);
        let lines = cart.materialize(&catalog);

        let mut repriced_menu = catalog.menu().to_vec();
        repriced_menu[0].unit_price = Won::new(99000);
        let repriced = Catalog::new(catalog.cities().to_vec(), repriced_menu).unwrap();

        assert_eq!(cart.subtotal(&repriced), Won::new(99000));
        assert_eq!(lines[0].unit_price, Won::new(20000));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.adjust_quantity(&id("a"), 2);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_quantities_never_zero_or_negative(
            ops in proptest::collection::vec((0usize..3, -3i32..4), 0..64)
        ) {
            let ids = [id("a"), id("b"), id("c")];
            let mut cart = Cart::new();
            let mut expected = [0i64; 3];

            for (idx, delta) in ops {
                let got = cart.adjust_quantity(&ids[idx], delta);
                expected[idx] = (expected[idx] + i64::from(delta)).max(0);
                prop_assert_eq!(i64::from(got), expected[idx]);
            }

            prop_assert!(cart.quantities.values().all(|&q| q > 0));
            for (idx, item) in ids.iter().enumerate() {
                prop_assert_eq!(cart.quantities.contains_key(item), expected[idx] > 0);
            }
        }
    }
}
