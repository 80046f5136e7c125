//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs`: rich domain types (validated, business-logic-ready)
//! - `wire.rs`: raw serde structs matching the JSON a catalog provider sends
//! - `convert.rs`: `TryFrom` conversions with validation
//! - `builtin.rs`: data compiled into the crate

pub mod cart;
pub mod catalog;
pub mod order;
