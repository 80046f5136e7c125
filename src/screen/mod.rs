//! Screen view models — one per step, parameterized by theme.
//!
//! A rendering host asks the flow for its current [`Screen`] and draws it. Screens
//! borrow from the flow and never mutate it; user actions go back through
//! [`crate::OrderFlow`].

use crate::domain::catalog::{CityCatalogEntry, MenuCatalogEntry};
use crate::domain::order::{pricing, OrderSummary, OrderedItem};
use crate::flow::{Progress, Step};
use crate::order_flow::OrderFlow;
use crate::shared::Won;
use serde::{Deserialize, Serialize};

/// Visual design variant. Behavior is identical across themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Bold,
}

/// The one screen to show for the current step.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<'a> {
    Landing(LandingScreen),
    CitySelector(CitySelectorScreen<'a>),
    MenuSelector(MenuSelectorScreen<'a>),
    OrderForm(OrderFormScreen<'a>),
    OrderComplete(OrderCompleteScreen<'a>),
}

impl<'a> Screen<'a> {
    pub fn for_flow(flow: &'a OrderFlow) -> Self {
        let config = flow.config();
        let theme = config.theme;
        let progress = flow.step().progress(config.variant);
        let catalog = flow.catalog();
        let record = flow.record();

        match flow.step() {
            Step::Start => Screen::Landing(LandingScreen { theme }),
            Step::ChoosingCity => Screen::CitySelector(CitySelectorScreen {
                theme,
                progress,
                featured: catalog.featured_cities().collect(),
                others: catalog.other_cities().collect(),
            }),
            Step::ChoosingMenu => {
                let cart = flow.cart();
                Screen::MenuSelector(MenuSelectorScreen {
                    theme,
                    progress,
                    city_name: city_name(flow),
                    lines: catalog
                        .menu()
                        .iter()
                        .map(|entry| MenuLine {
                            entry,
                            quantity: cart.quantity(&entry.id),
                        })
                        .collect(),
                    item_count: cart.total_item_count(),
                    subtotal: cart.subtotal(catalog),
                })
            }
            Step::EnteringDetails => {
                let subtotal = record.subtotal();
                Screen::OrderForm(OrderFormScreen {
                    theme,
                    progress,
                    city_name: city_name(flow),
                    items: &record.items,
                    subtotal,
                    service_fee: config.service_fee,
                    final_total: pricing::final_total(subtotal, config.service_fee),
                })
            }
            Step::Completed => match flow.confirmation() {
                Some(summary) => Screen::OrderComplete(OrderCompleteScreen { theme, summary }),
                None => {
                    tracing::warn!("Completed step without a confirmation, showing landing");
                    Screen::Landing(LandingScreen { theme })
                }
            },
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            Screen::Landing(s) => s.theme,
            Screen::CitySelector(s) => s.theme,
            Screen::MenuSelector(s) => s.theme,
            Screen::OrderForm(s) => s.theme,
            Screen::OrderComplete(s) => s.theme,
        }
    }
}

fn city_name(flow: &OrderFlow) -> String {
    let city = &flow.record().city;
    flow.catalog()
        .city(city)
        .map(|c| c.localized_name.clone())
        .unwrap_or_else(|| city.to_string())
}

// ─── Screens ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingScreen {
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CitySelectorScreen<'a> {
    pub theme: Theme,
    pub progress: Option<Progress>,
    pub featured: Vec<&'a CityCatalogEntry>,
    pub others: Vec<&'a CityCatalogEntry>,
}

/// A menu card with the quantity currently in the cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuLine<'a> {
    pub entry: &'a MenuCatalogEntry,
    pub quantity: u32,
}

impl MenuLine<'_> {
    pub fn badge(&self) -> Option<&'static str> {
        self.entry.tag.map(|t| t.label())
    }

    pub fn is_selected(&self) -> bool {
        self.quantity > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSelectorScreen<'a> {
    pub theme: Theme,
    pub progress: Option<Progress>,
    pub city_name: String,
    pub lines: Vec<MenuLine<'a>>,
    pub item_count: u64,
    pub subtotal: Won,
}

impl MenuSelectorScreen<'_> {
    /// The floating cart bar only appears once something is selected.
    pub fn show_cart(&self) -> bool {
        self.item_count > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderFormScreen<'a> {
    pub theme: Theme,
    pub progress: Option<Progress>,
    pub city_name: String,
    pub items: &'a [OrderedItem],
    pub subtotal: Won,
    pub service_fee: Won,
    pub final_total: Won,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCompleteScreen<'a> {
    pub theme: Theme,
    pub summary: &'a OrderSummary,
}
