//! # K-Delivery
//!
//! Ordering core for a Korean chicken-delivery service aimed at visitors: a
//! step-by-step order flow, a cart with pricing, an order summary and the
//! catalog of cities and menu items it all draws from.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Newtypes, catalog, cart and order domain models
//! 2. **Flow** — Steps, events and the pure transition function
//! 3. **Controller** — `OrderFlow`, which owns one visitor's session
//! 4. **Screens** — Per-step view models a host renders, plus the contact widget
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kdelivery::prelude::*;
//!
//! let mut flow = OrderFlow::builder().theme(Theme::Bold).build()?;
//! flow.begin()?;
//! flow.adjust_quantity(&MenuItemId::from("bbq-olive"), 2)?;
//! flow.checkout()?;
//! flow.submit_details(DeliveryDetails::new("Lotte Hotel 1201", "wx_tourist"))?;
//!
//! let summary = flow.confirmation().unwrap();
//! println!("{}", summary);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): catalog, cart, order.
pub mod domain;

/// Unified error types.
pub mod error;

/// Default configuration constants.
pub mod defaults;

// ── Layer 2: Flow ────────────────────────────────────────────────────────────

/// Order steps, events and transitions.
pub mod flow;

// ── Layer 3: Controller ──────────────────────────────────────────────────────

/// `OrderFlow` — the primary entry point.
pub mod order_flow;

// ── Layer 4: Screens ─────────────────────────────────────────────────────────

/// Per-step screen view models.
pub mod screen;

/// Floating contact panel.
pub mod contact;

pub use order_flow::{OrderFlow, OrderFlowBuilder};

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{CityId, MenuItemId, Won};

    // Domain types — catalog
    pub use crate::domain::catalog::{
        Catalog, CatalogValidationError, CityCatalogEntry, MenuCatalogEntry, MenuTag,
    };

    // Domain types — cart
    pub use crate::domain::cart::Cart;

    // Domain types — order
    pub use crate::domain::order::{
        AddressImage, DeliveryDetails, DetailsValidationError, OrderNumber, OrderNumberScheme,
        OrderRecord, OrderSummary, OrderedItem,
    };

    // Flow
    pub use crate::flow::{
        EmptyCartPolicy, Event, FlowConfig, FlowState, FlowVariant, Progress, Step,
    };

    // Errors
    pub use crate::error::{FlowError, TransitionError};

    // Defaults
    pub use crate::defaults::{DEFAULT_CITY_ID, DEFAULT_SERVICE_FEE};

    // Controller
    pub use crate::order_flow::{OrderFlow, OrderFlowBuilder};

    // Screens
    pub use crate::contact::{ContactAgent, ContactWidget};
    pub use crate::screen::{Screen, Theme};
}
