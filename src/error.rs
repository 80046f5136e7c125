//! Unified error types.

use crate::domain::catalog::CatalogValidationError;
use crate::domain::order::details::DetailsValidationError;
use crate::flow::Step;
use crate::shared::{CityId, MenuItemId};
use thiserror::Error;

/// Top-level error for every fallible operation in the crate.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    #[error("Validation error: {0}")]
    Details(#[from] DetailsValidationError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogValidationError),

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A step transition was rejected. The flow is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    #[error("{action} is not allowed at step {step}")]
    NotAllowed { step: Step, action: &'static str },

    #[error("Unknown city: {0}")]
    UnknownCity(CityId),

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),

    #[error("Menu item listed twice: {0}")]
    DuplicateMenuItem(MenuItemId),

    #[error("Quantity must be at least 1 for menu item: {0}")]
    ZeroQuantity(MenuItemId),

    #[error("Cart is empty")]
    EmptyCart,
}
