//! Order pricing. The cart and the order summary both total through here.

use crate::shared::Won;

/// `Σ unit_price × quantity` over `(unit_price, quantity)` lines.
pub fn subtotal(lines: impl IntoIterator<Item = (Won, u32)>) -> Won {
    lines
        .into_iter()
        .map(|(unit_price, quantity)| unit_price.times(quantity))
        .sum()
}

/// Subtotal plus the flat service fee. The fee does not scale with the cart.
pub fn final_total(subtotal: Won, service_fee: Won) -> Won {
    subtotal + service_fee
}
