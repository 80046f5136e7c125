//! Flow state and the pure transition function.
//!
//! `apply` never mutates its input: a rejected event leaves the caller's state
//! exactly as it was.

use super::{EmptyCartPolicy, Event, FlowConfig, FlowVariant, Step};
use crate::domain::catalog::Catalog;
use crate::domain::order::{OrderRecord, OrderedItem};
use crate::error::{FlowError, TransitionError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current step plus the accumulated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
    pub step: Step,
    pub record: OrderRecord,
}

impl FlowState {
    pub fn initial(config: &FlowConfig) -> Self {
        Self {
            step: Step::Start,
            record: OrderRecord::new(config.default_city.clone()),
        }
    }
}

/// Read-only inputs a transition may consult.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    pub config: &'a FlowConfig,
    pub catalog: &'a Catalog,
}

/// Compute the state after `event`, or the reason it is rejected.
pub fn apply(
    state: &FlowState,
    event: Event,
    ctx: &TransitionContext<'_>,
) -> Result<FlowState, FlowError> {
    let mut next = state.clone();

    match (state.step, event) {
        (Step::Start, Event::Begin) => {
            next.step = ctx.config.variant.first_step();
        }
        (Step::ChoosingCity, Event::SelectCity(city)) => {
            if ctx.catalog.city(&city).is_none() {
                return Err(TransitionError::UnknownCity(city).into());
            }
            next.record.city = city;
            next.step = Step::ChoosingMenu;
        }
        (Step::ChoosingMenu, Event::SelectMenu(items)) => {
            check_items(&items, ctx)?;
            next.record.items = items;
            next.step = Step::EnteringDetails;
        }
        (Step::EnteringDetails, Event::SubmitDetails(details)) => {
            if state.record.items.is_empty()
                && ctx.config.empty_cart_policy == EmptyCartPolicy::Reject
            {
                return Err(TransitionError::EmptyCart.into());
            }
            next.record.apply_details(details.validate()?);
            next.step = Step::Completed;
        }
        (Step::Completed, Event::Reset) => {
            next = FlowState::initial(ctx.config);
        }
        (Step::ChoosingCity, Event::Back) => {
            next = FlowState::initial(ctx.config);
        }
        (Step::ChoosingMenu, Event::Back) => match ctx.config.variant {
            FlowVariant::ChooseCity => next.step = Step::ChoosingCity,
            FlowVariant::FixedCity => next = FlowState::initial(ctx.config),
        },
        (Step::EnteringDetails, Event::Back) => {
            next.step = Step::ChoosingMenu;
        }
        (step, event) => {
            return Err(TransitionError::NotAllowed {
                step,
                action: event.name(),
            }
            .into());
        }
    }

    Ok(next)
}

pub(crate) fn check_items(
    items: &[OrderedItem],
    ctx: &TransitionContext<'_>,
) -> Result<(), TransitionError> {
    if items.is_empty() && ctx.config.empty_cart_policy == EmptyCartPolicy::Reject {
        return Err(TransitionError::EmptyCart);
    }

    let mut seen = HashSet::new();
    for item in items {
        if ctx.catalog.menu_item(&item.id).is_none() {
            return Err(TransitionError::UnknownMenuItem(item.id.clone()));
        }
        if item.quantity == 0 {
            return Err(TransitionError::ZeroQuantity(item.id.clone()));
        }
        if !seen.insert(&item.id) {
            return Err(TransitionError::DuplicateMenuItem(item.id.clone()));
        }
    }
    Ok(())
}
