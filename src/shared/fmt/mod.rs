//! Display formatting helpers.

pub mod num;

pub use num::{display_amount, group_thousands};
