//! Completed-order summary and the display order number.

use super::{pricing, OrderRecord, OrderedItem};
use crate::defaults::ORDER_NUMBER_DIGITS;
use crate::domain::catalog::Catalog;
use crate::shared::{CityId, Won};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── OrderNumber ─────────────────────────────────────────────────────────────

/// How the digits of an order number are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderNumberScheme {
    /// Last digits of the epoch-millisecond timestamp.
    #[default]
    Timestamp,
    /// Uniformly random digits.
    Random,
}

/// Display-only order number (e.g. `KD12345678`).
///
/// Cosmetic. Two sessions can produce the same number; it is not a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn generate(prefix: &str, scheme: OrderNumberScheme, now: DateTime<Utc>) -> Self {
        let modulus = 10u64.pow(ORDER_NUMBER_DIGITS);
        let digits = match scheme {
            OrderNumberScheme::Timestamp => now.timestamp_millis().unsigned_abs() % modulus,
            OrderNumberScheme::Random => rand::thread_rng().gen_range(0..modulus),
        };
        Self(format!(
            "{prefix}{digits:0width$}",
            width = ORDER_NUMBER_DIGITS as usize
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── OrderSummary ────────────────────────────────────────────────────────────

/// Final, immutable figures of a completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    pub city: CityId,
    pub city_name: String,
    pub items: Vec<OrderedItem>,
    pub delivery_address: String,
    pub wechat_id: String,
    pub note: String,
    pub has_address_image: bool,
    pub subtotal: Won,
    pub service_fee: Won,
    pub final_total: Won,
}

impl OrderSummary {
    /// Totals are computed from the record's own item snapshot, never the catalog.
    /// The catalog only supplies the city's display name.
    pub fn from_record(
        record: &OrderRecord,
        catalog: &Catalog,
        service_fee: Won,
        order_number: OrderNumber,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let subtotal = record.subtotal();
        let city_name = catalog
            .city(&record.city)
            .map(|c| c.localized_name.clone())
            .unwrap_or_else(|| record.city.to_string());

        Self {
            order_number,
            placed_at,
            city: record.city.clone(),
            city_name,
            items: record.items.clone(),
            delivery_address: record.delivery_address.clone(),
            wechat_id: record.wechat_id.clone(),
            note: record.note.clone(),
            has_address_image: record.address_image.is_some(),
            subtotal,
            service_fee,
            final_total: pricing::final_total(subtotal, service_fee),
        }
    }

    /// `"BBQ 황금올리브 x2, BHC 뿌링클 x1"`
    pub fn item_line(&self) -> String {
        self.items
            .iter()
            .map(|i| format!("{} x{}", i.localized_name, i.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order {}", self.order_number)?;
        writeln!(f, "  City:     {}", self.city_name)?;
        writeln!(f, "  Items:    {}", self.item_line())?;
        writeln!(f, "  Address:  {}", self.delivery_address)?;
        writeln!(f, "  Subtotal: {}", self.subtotal)?;
        writeln!(f, "  Fee:      {}", self.service_fee)?;
        write!(f, "  Total:    {}", self.final_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::MenuItemId;
    use chrono::TimeZone;

    fn record_with_items(items: Vec<(&str, &str, u64, u32)>) -> OrderRecord {
        let mut record = OrderRecord::new(CityId::from("seoul"));
        record.items = items
            .into_iter()
            .map(|(id, localized, price, quantity)| OrderedItem {
                id: MenuItemId::from(id),
                name: id.to_string(),
                localized_name: localized.to_string(),
                unit_price: Won::new(price),
                quantity,
            })
            .collect();
        record.delivery_address = "Lotte Hotel".to_string();
        record.wechat_id = "wx_tourist".to_string();
        record
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_767_225_600_123).unwrap()
    }

    #[test]
    fn test_timestamp_order_number_uses_last_digits() {
        let number = OrderNumber::generate("KD", OrderNumberScheme::Timestamp, fixed_time());
        assert_eq!(number.as_str(), "KD25600123");
    }

    #[test]
    fn test_timestamp_order_number_is_zero_padded() {
        let now = Utc.timestamp_millis_opt(42).unwrap();
        let number = OrderNumber::generate("KD", OrderNumberScheme::Timestamp, now);
        assert_eq!(number.as_str(), "KD00000042");
    }

    #[test]
    fn test_random_order_number_shape() {
        let number = OrderNumber::generate("KD", OrderNumberScheme::Random, fixed_time());
        let digits = number.as_str().strip_prefix("KD").unwrap();
        assert_eq!(digits.len(), 8);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_summary_totals() {
        let record = record_with_items(vec![
            ("bbq-olive", "BBQ 황금올리브", 20000, 2),
            ("bhc-ppuring", "BHC 뿌링클", 21000, 1),
        ]);
        let summary = OrderSummary::from_record(
            &record,
            &Catalog::builtin(),
            Won::new(5000),
            OrderNumber::generate("KD", OrderNumberScheme::Timestamp, fixed_time()),
            fixed_time(),
        );
        assert_eq!(summary.subtotal, Won::new(61000));
        assert_eq!(summary.final_total, Won::new(66000));
        assert_eq!(summary.city_name, "서울");
        assert_eq!(summary.item_line(), "BBQ 황금올리브 x2, BHC 뿌링클 x1");
        assert_eq!(summary.item_count(), 3);
        assert!(summary.to_string().contains("₩66,000"));
    }

    #[test]
    fn test_fee_is_flat_regardless_of_item_count() {
        let one = record_with_items(vec![("a", "A", 40000, 1)]);
        let many = record_with_items(vec![("a", "A", 10000, 4)]);
        let catalog = Catalog::builtin();
        let number = OrderNumber::generate("KD", OrderNumberScheme::Timestamp, fixed_time());
        let s1 = OrderSummary::from_record(&one, &catalog, Won::new(5000), number.clone(), fixed_time());
        let s2 = OrderSummary::from_record(&many, &catalog, Won::new(5000), number, fixed_time());
        assert_eq!(s1.final_total, Won::new(45000));
        assert_eq!(s2.final_total, Won::new(45000));
    }

    #[test]
    fn test_unknown_city_falls_back_to_id() {
        let mut record = record_with_items(vec![]);
        record.city = CityId::from("atlantis");
        let summary = OrderSummary::from_record(
            &record,
            &Catalog::builtin(),
            Won::new(5000),
            OrderNumber::generate("KD", OrderNumberScheme::Timestamp, fixed_time()),
            fixed_time(),
        );
        assert_eq!(summary.city_name, "atlantis");
        assert_eq!(summary.final_total, Won::new(5000));
    }
}
