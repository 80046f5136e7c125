//! Order flow — steps, events, configuration.
//!
//! The wizard is strictly linear:
//!
//! ```text
//! Start ──Begin──▶ [ChoosingCity ──SelectCity──▶] ChoosingMenu ──SelectMenu──▶
//!     EnteringDetails ──SubmitDetails──▶ Completed ──Reset──▶ Start
//! ```
//!
//! `Back` walks one step left from any step between `Start` and `Completed`.

pub mod state;

use crate::defaults::{DEFAULT_CITY_ID, DEFAULT_SERVICE_FEE, ORDER_NUMBER_PREFIX};
use crate::domain::order::{DeliveryDetails, OrderNumberScheme, OrderedItem};
use crate::screen::Theme;
use crate::shared::{CityId, Won};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use state::{apply, FlowState, TransitionContext};

// ─── Step ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Start,
    ChoosingCity,
    ChoosingMenu,
    EnteringDetails,
    Completed,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Start => "start",
            Step::ChoosingCity => "choosing-city",
            Step::ChoosingMenu => "choosing-menu",
            Step::EnteringDetails => "entering-details",
            Step::Completed => "completed",
        }
    }

    /// Position in the "step N / M" indicator. `None` outside the wizard proper.
    pub fn progress(&self, variant: FlowVariant) -> Option<Progress> {
        let (position, total) = match (variant, self) {
            (FlowVariant::ChooseCity, Step::ChoosingCity) => (1, 3),
            (FlowVariant::ChooseCity, Step::ChoosingMenu) => (2, 3),
            (FlowVariant::ChooseCity, Step::EnteringDetails) => (3, 3),
            (FlowVariant::FixedCity, Step::ChoosingMenu) => (1, 2),
            (FlowVariant::FixedCity, Step::EnteringDetails) => (2, 2),
            _ => return None,
        };
        Some(Progress { position, total })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wizard progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub position: u8,
    pub total: u8,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.position, self.total)
    }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// What a screen hands back to the flow when the user acts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum Event {
    Begin,
    SelectCity(CityId),
    SelectMenu(Vec<OrderedItem>),
    SubmitDetails(DeliveryDetails),
    Back,
    Reset,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Begin => "begin",
            Event::SelectCity(_) => "select-city",
            Event::SelectMenu(_) => "select-menu",
            Event::SubmitDetails(_) => "submit-details",
            Event::Back => "back",
            Event::Reset => "reset",
        }
    }
}

// ─── Configuration ───────────────────────────────────────────────────────────

/// Whether the visitor picks a city or the flow uses the default one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowVariant {
    /// Start straight at the menu with the configured default city.
    #[default]
    FixedCity,
    /// Ask for the city first.
    ChooseCity,
}

impl FlowVariant {
    /// Step entered by `Begin`.
    pub fn first_step(&self) -> Step {
        match self {
            FlowVariant::FixedCity => Step::ChoosingMenu,
            FlowVariant::ChooseCity => Step::ChoosingCity,
        }
    }
}

/// What happens when the menu step is completed with nothing selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyCartPolicy {
    /// Refuse to leave the menu step.
    #[default]
    Reject,
    /// Proceed; the order is charged only the service fee.
    Allow,
}

/// Flow settings. Built with [`crate::OrderFlowBuilder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub service_fee: Won,
    pub default_city: CityId,
    pub variant: FlowVariant,
    pub empty_cart_policy: EmptyCartPolicy,
    pub order_number_prefix: String,
    pub order_number_scheme: OrderNumberScheme,
    pub theme: Theme,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            service_fee: DEFAULT_SERVICE_FEE,
            default_city: CityId::from(DEFAULT_CITY_ID),
            variant: FlowVariant::default(),
            empty_cart_policy: EmptyCartPolicy::default(),
            order_number_prefix: ORDER_NUMBER_PREFIX.to_string(),
            order_number_scheme: OrderNumberScheme::default(),
            theme: Theme::default(),
        }
    }
}
