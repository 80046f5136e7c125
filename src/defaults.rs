//! Default configuration constants.

use crate::shared::Won;

/// Flat service fee charged once per order.
pub const DEFAULT_SERVICE_FEE: Won = Won::new(5000);

/// City every order starts with. Seoul only at launch.
pub const DEFAULT_CITY_ID: &str = "seoul";

/// Prefix of the display order number.
pub const ORDER_NUMBER_PREFIX: &str = "KD";

/// Digits after the order number prefix.
pub const ORDER_NUMBER_DIGITS: u32 = 8;
