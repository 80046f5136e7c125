//! `OrderFlow` — the controller a host drives, plus its builder.
//!
//! The flow exclusively owns the order record, the current step and the menu
//! step's cart. Screens read it through [`OrderFlow::screen`] and act on it
//! through the event methods.

use crate::domain::cart::Cart;
use crate::domain::catalog::{Catalog, CatalogValidationError};
use crate::domain::order::{
    pricing, DeliveryDetails, OrderNumber, OrderNumberScheme, OrderRecord, OrderSummary,
    OrderedItem,
};
use crate::error::{FlowError, TransitionError};
use crate::flow::state::{self, check_items, FlowState, TransitionContext};
use crate::flow::{EmptyCartPolicy, Event, FlowConfig, FlowVariant, Step};
use crate::screen::{Screen, Theme};
use crate::shared::{CityId, MenuItemId, Won};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One visitor's ordering session.
#[derive(Debug, Clone)]
pub struct OrderFlow {
    config: FlowConfig,
    catalog: Arc<Catalog>,
    state: FlowState,
    /// Working selection while at the menu step.
    cart: Cart,
    /// Set on entering `Completed`, cleared on reset.
    confirmation: Option<OrderSummary>,
}

impl OrderFlow {
    pub fn builder() -> OrderFlowBuilder {
        OrderFlowBuilder::default()
    }

    /// A flow over the built-in catalog with default settings.
    pub fn new() -> Self {
        let config = FlowConfig::default();
        Self {
            state: FlowState::initial(&config),
            config,
            catalog: Arc::new(Catalog::builtin()),
            cart: Cart::new(),
            confirmation: None,
        }
    }

    // ── Read access ──────────────────────────────────────────────────────

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn record(&self) -> &OrderRecord {
        &self.state.record
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn confirmation(&self) -> Option<&OrderSummary> {
        self.confirmation.as_ref()
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The screen for the current step.
    pub fn screen(&self) -> Screen<'_> {
        Screen::for_flow(self)
    }

    /// Subtotal of the items on record.
    pub fn subtotal(&self) -> Won {
        self.state.record.subtotal()
    }

    /// Subtotal plus the service fee.
    pub fn final_total(&self) -> Won {
        pricing::final_total(self.subtotal(), self.config.service_fee)
    }

    // ── Events ───────────────────────────────────────────────────────────

    /// Apply an event. On error nothing changes.
    pub fn apply(&mut self, event: Event) -> Result<Step, FlowError> {
        let from = self.state.step;
        let action = event.name();

        let result = {
            let ctx = TransitionContext {
                config: &self.config,
                catalog: &self.catalog,
            };
            state::apply(&self.state, event, &ctx)
        };

        match result {
            Ok(next) => {
                self.enter(next);
                tracing::debug!("{}: {} -> {}", action, from, self.state.step);
                Ok(self.state.step)
            }
            Err(e) => {
                tracing::warn!("Rejected {} at {}: {}", action, from, e);
                Err(e)
            }
        }
    }

    pub fn begin(&mut self) -> Result<Step, FlowError> {
        self.apply(Event::Begin)
    }

    pub fn select_city(&mut self, city: impl Into<CityId>) -> Result<Step, FlowError> {
        self.apply(Event::SelectCity(city.into()))
    }

    pub fn select_menu(&mut self, items: Vec<OrderedItem>) -> Result<Step, FlowError> {
        self.apply(Event::SelectMenu(items))
    }

    pub fn submit_details(&mut self, details: DeliveryDetails) -> Result<Step, FlowError> {
        self.apply(Event::SubmitDetails(details))
    }

    pub fn back(&mut self) -> Result<Step, FlowError> {
        self.apply(Event::Back)
    }

    pub fn reset(&mut self) -> Result<Step, FlowError> {
        self.apply(Event::Reset)
    }

    // ── Cart (menu step only) ────────────────────────────────────────────

    /// Change the quantity of a catalog item in the cart. Returns the new quantity.
    pub fn adjust_quantity(&mut self, id: &MenuItemId, delta: i32) -> Result<u32, FlowError> {
        self.require_menu_step("adjust-quantity")?;
        if self.catalog.menu_item(id).is_none() {
            return Err(TransitionError::UnknownMenuItem(id.clone()).into());
        }
        Ok(self.cart.adjust_quantity(id, delta))
    }

    /// Empty the cart. Other steps' data is untouched.
    pub fn clear_cart(&mut self) -> Result<(), FlowError> {
        self.require_menu_step("clear-cart")?;
        self.cart.clear();
        Ok(())
    }

    /// Complete the menu step with the cart's contents.
    pub fn checkout(&mut self) -> Result<Step, FlowError> {
        self.require_menu_step("checkout")?;
        let items = self.cart.materialize(&self.catalog);
        self.select_menu(items)
    }

    fn require_menu_step(&self, action: &'static str) -> Result<(), FlowError> {
        if self.state.step != Step::ChoosingMenu {
            return Err(TransitionError::NotAllowed {
                step: self.state.step,
                action,
            }
            .into());
        }
        Ok(())
    }

    fn enter(&mut self, next: FlowState) {
        let from = self.state.step;
        self.state = next;

        match self.state.step {
            Step::ChoosingMenu if from != Step::ChoosingMenu => self.cart.clear(),
            Step::Completed if from != Step::Completed => {
                let now = Utc::now();
                let number = OrderNumber::generate(
                    &self.config.order_number_prefix,
                    self.config.order_number_scheme,
                    now,
                );
                let summary = OrderSummary::from_record(
                    &self.state.record,
                    &self.catalog,
                    self.config.service_fee,
                    number,
                    now,
                );
                tracing::info!(
                    "Order {} placed: {} item(s), total {}",
                    summary.order_number,
                    summary.item_count(),
                    summary.final_total
                );
                self.confirmation = Some(summary);
            }
            Step::Start => {
                self.cart.clear();
                if let Some(done) = self.confirmation.take() {
                    tracing::info!("Order flow reset after {}", done.order_number);
                }
            }
            _ => {}
        }
    }

    // ── Snapshot ─────────────────────────────────────────────────────────

    /// Serialize step, record and confirmation. The cart is not included.
    pub fn to_json(&self) -> Result<String, FlowError> {
        let snapshot = FlowSnapshot {
            step: self.state.step,
            record: self.state.record.clone(),
            confirmation: self.confirmation.clone(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Replace this flow's session with a snapshot from [`OrderFlow::to_json`].
    ///
    /// The snapshot must be consistent with this flow's catalog and settings.
    pub fn restore_json(&mut self, json: &str) -> Result<(), FlowError> {
        let snapshot: FlowSnapshot = serde_json::from_str(json)?;
        self.check_snapshot(&snapshot)?;

        self.state = FlowState {
            step: snapshot.step,
            record: snapshot.record,
        };
        self.confirmation = snapshot.confirmation;
        self.cart.clear();
        tracing::debug!("Restored order flow at {}", self.state.step);
        Ok(())
    }

    fn check_snapshot(&self, snapshot: &FlowSnapshot) -> Result<(), FlowError> {
        let invalid = |msg: String| Err(FlowError::Snapshot(msg));
        let record = &snapshot.record;

        if self.catalog.city(&record.city).is_none() {
            return invalid(format!("unknown city {}", record.city));
        }
        if self.config.variant == FlowVariant::FixedCity {
            if snapshot.step == Step::ChoosingCity {
                return invalid("city step is disabled".to_string());
            }
            if record.city != self.config.default_city {
                return invalid(format!(
                    "city {} differs from the fixed city {}",
                    record.city, self.config.default_city
                ));
            }
        }
        if snapshot.step == Step::Start
            && *record != OrderRecord::new(self.config.default_city.clone())
        {
            return invalid("start step with a non-empty record".to_string());
        }

        let has_items_step = matches!(snapshot.step, Step::EnteringDetails | Step::Completed);
        if has_items_step || !record.items.is_empty() {
            let ctx = TransitionContext {
                config: &self.config,
                catalog: &self.catalog,
            };
            check_items(&record.items, &ctx).map_err(|e| FlowError::Snapshot(e.to_string()))?;
        }

        match (snapshot.step, &snapshot.confirmation) {
            (Step::Completed, Some(summary)) => self.check_completed(record, summary),
            (Step::Completed, None) => invalid("completed without confirmation".to_string()),
            (_, Some(_)) => invalid("confirmation before completion".to_string()),
            (_, None) if has_details(record) => {
                invalid("delivery details before completion".to_string())
            }
            (_, None) => Ok(()),
        }
    }

    /// Details must be valid as submitted and the summary must be the one
    /// this flow would compute from the record.
    fn check_completed(
        &self,
        record: &OrderRecord,
        summary: &OrderSummary,
    ) -> Result<(), FlowError> {
        let details = DeliveryDetails {
            delivery_address: record.delivery_address.clone(),
            wechat_id: record.wechat_id.clone(),
            note: record.note.clone(),
            address_image: record.address_image.clone(),
        };
        let validated = details
            .clone()
            .validate()
            .map_err(|e| FlowError::Snapshot(e.to_string()))?;
        if validated != details {
            return Err(FlowError::Snapshot("untrimmed delivery details".to_string()));
        }

        let expected = OrderSummary::from_record(
            record,
            &self.catalog,
            self.config.service_fee,
            summary.order_number.clone(),
            summary.placed_at,
        );
        if *summary != expected {
            return Err(FlowError::Snapshot(
                "confirmation does not match the order record".to_string(),
            ));
        }
        Ok(())
    }
}

fn has_details(record: &OrderRecord) -> bool {
    !record.delivery_address.is_empty()
        || !record.wechat_id.is_empty()
        || !record.note.is_empty()
        || record.address_image.is_some()
}

impl Default for OrderFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FlowSnapshot {
    step: Step,
    record: OrderRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confirmation: Option<OrderSummary>,
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct OrderFlowBuilder {
    config: FlowConfig,
    catalog: Option<Arc<Catalog>>,
}

impl Default for OrderFlowBuilder {
    fn default() -> Self {
        Self {
            config: FlowConfig::default(),
            catalog: None,
        }
    }
}

impl OrderFlowBuilder {
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Share one catalog between several flows.
    pub fn shared_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn service_fee(mut self, fee: Won) -> Self {
        self.config.service_fee = fee;
        self
    }

    pub fn default_city(mut self, city: impl Into<CityId>) -> Self {
        self.config.default_city = city.into();
        self
    }

    pub fn variant(mut self, variant: FlowVariant) -> Self {
        self.config.variant = variant;
        self
    }

    pub fn empty_cart_policy(mut self, policy: EmptyCartPolicy) -> Self {
        self.config.empty_cart_policy = policy;
        self
    }

    pub fn order_number_prefix(mut self, prefix: &str) -> Self {
        self.config.order_number_prefix = prefix.to_string();
        self
    }

    pub fn order_number_scheme(mut self, scheme: OrderNumberScheme) -> Self {
        self.config.order_number_scheme = scheme;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    /// Replace every setting at once.
    pub fn config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<OrderFlow, FlowError> {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(Catalog::builtin()));

        if catalog.city(&self.config.default_city).is_none() {
            return Err(
                CatalogValidationError::UnknownDefaultCity(self.config.default_city.clone()).into(),
            );
        }

        Ok(OrderFlow {
            state: FlowState::initial(&self.config),
            config: self.config,
            catalog,
            cart: Cart::new(),
            confirmation: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::AddressImage;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> MenuItemId {
        MenuItemId::from(s)
    }

    fn completed_flow() -> OrderFlow {
        let mut flow = OrderFlow::new();
        flow.begin().unwrap();
        flow.adjust_quantity(&id("bbq-olive"), 2).unwrap();
        flow.checkout().unwrap();
        flow.submit_details(DeliveryDetails::new("Lotte Hotel 1201", "wx_tourist"))
            .unwrap();
        flow
    }

    #[test]
    fn test_builder_rejects_unknown_default_city() {
        let err = OrderFlow::builder().default_city("atlantis").build().unwrap_err();
        assert!(matches!(
            err,
            FlowError::Catalog(CatalogValidationError::UnknownDefaultCity(_))
        ));
    }

    #[test]
    fn test_builder_settings_applied() {
        let flow = OrderFlow::builder()
            .service_fee(Won::new(3000))
            .default_city("busan")
            .order_number_prefix("ZZ")
            .build()
            .unwrap();
        assert_eq!(flow.record().city, CityId::from("busan"));
        assert_eq!(flow.config().service_fee, Won::new(3000));
        assert_eq!(flow.config().order_number_prefix, "ZZ");
    }

    #[test]
    fn test_cart_only_at_menu_step() {
        let mut flow = OrderFlow::new();
        let err = flow.adjust_quantity(&id("bbq-olive"), 1).unwrap_err();
        assert!(matches!(
            err,
            FlowError::Transition(TransitionError::NotAllowed {
                step: Step::Start,
                action: "adjust-quantity"
            })
        ));
        assert!(flow.checkout().is_err());
        assert!(flow.clear_cart().is_err());
    }

    #[test]
    fn test_adjust_unknown_item_rejected() {
        let mut flow = OrderFlow::new();
        flow.begin().unwrap();
        assert!(flow.adjust_quantity(&id("ghost"), 1).is_err());
        assert!(flow.cart().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart_rejected() {
        let mut flow = OrderFlow::new();
        flow.begin().unwrap();
        flow.adjust_quantity(&id("bbq-olive"), 1).unwrap();
        flow.clear_cart().unwrap();
        let err = flow.checkout().unwrap_err();
        assert!(matches!(err, FlowError::Transition(TransitionError::EmptyCart)));
        assert_eq!(flow.step(), Step::ChoosingMenu);
    }

    #[test]
    fn test_cart_emptied_on_reentering_menu() {
        let mut flow = OrderFlow::new();
        flow.begin().unwrap();
        flow.adjust_quantity(&id("bbq-olive"), 1).unwrap();
        flow.checkout().unwrap();
        flow.back().unwrap();
        assert_eq!(flow.step(), Step::ChoosingMenu);
        assert!(flow.cart().is_empty());
        assert_eq!(flow.record().items.len(), 1);
    }

    #[test]
    fn test_confirmation_is_stable_and_cleared_on_reset() {
        let mut flow = completed_flow();
        let first = flow.confirmation().unwrap().order_number.clone();
        let _ = flow.screen();
        assert_eq!(flow.confirmation().unwrap().order_number, first);
        assert!(first.as_str().starts_with("KD"));
        assert_eq!(flow.final_total(), Won::new(45000));

        flow.reset().unwrap();
        assert!(flow.confirmation().is_none());
        assert_eq!(flow.step(), Step::Start);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let flow = completed_flow();
        let json = flow.to_json().unwrap();

        let mut restored = OrderFlow::new();
        restored.restore_json(&json).unwrap();
        assert_eq!(restored.step(), Step::Completed);
        assert_eq!(restored.record(), flow.record());
        assert_eq!(restored.confirmation(), flow.confirmation());
    }

    #[test]
    fn test_snapshot_rejects_city_step_in_fixed_variant() {
        let mut flow = OrderFlow::builder()
            .variant(FlowVariant::ChooseCity)
            .build()
            .unwrap();
        flow.begin().unwrap();
        let json = flow.to_json().unwrap();

        let mut fixed = OrderFlow::new();
        let err = fixed.restore_json(&json).unwrap_err();
        assert!(matches!(err, FlowError::Snapshot(_)));
        assert_eq!(fixed.step(), Step::Start);
    }

    #[test]
    fn test_snapshot_rejects_other_city_in_fixed_variant() {
        let mut flow = OrderFlow::new();
        flow.begin().unwrap();
        let json = flow.to_json().unwrap().replace("\"seoul\"", "\"busan\"");

        let mut fixed = OrderFlow::new();
        assert!(matches!(
            fixed.restore_json(&json).unwrap_err(),
            FlowError::Snapshot(_)
        ));
        assert_eq!(fixed.record().city, CityId::from("seoul"));

        let mut choosing = OrderFlow::builder()
            .variant(FlowVariant::ChooseCity)
            .build()
            .unwrap();
        choosing.restore_json(&json).unwrap();
        assert_eq!(choosing.record().city, CityId::from("busan"));
    }

    fn snapshot_of(flow: &OrderFlow) -> FlowSnapshot {
        serde_json::from_str(&flow.to_json().unwrap()).unwrap()
    }

    fn restore_snapshot(snapshot: &FlowSnapshot) -> Result<(), FlowError> {
        OrderFlow::new().restore_json(&serde_json::to_string(snapshot).unwrap())
    }

    #[test]
    fn test_snapshot_rejects_blank_wechat_id_when_completed() {
        let json = completed_flow()
            .to_json()
            .unwrap()
            .replace("\"wechat_id\":\"wx_tourist\"", "\"wechat_id\":\"   \"");
        let mut flow = OrderFlow::new();
        assert!(matches!(
            flow.restore_json(&json).unwrap_err(),
            FlowError::Snapshot(_)
        ));
        assert_eq!(flow.step(), Step::Start);
    }

    #[test]
    fn test_snapshot_rejects_untrimmed_details() {
        let mut snapshot = snapshot_of(&completed_flow());
        snapshot.record.wechat_id = " wx_tourist ".to_string();
        if let Some(summary) = snapshot.confirmation.as_mut() {
            summary.wechat_id = " wx_tourist ".to_string();
        }
        assert!(matches!(
            restore_snapshot(&snapshot).unwrap_err(),
            FlowError::Snapshot(_)
        ));
    }

    #[test]
    fn test_snapshot_rejects_forged_totals() {
        let json = completed_flow()
            .to_json()
            .unwrap()
            .replace("\"final_total\":45000", "\"final_total\":1");
        assert!(matches!(
            OrderFlow::new().restore_json(&json).unwrap_err(),
            FlowError::Snapshot(_)
        ));

        let mut snapshot = snapshot_of(&completed_flow());
        if let Some(summary) = snapshot.confirmation.as_mut() {
            summary.service_fee = Won::ZERO;
            summary.final_total = summary.subtotal;
        }
        assert!(restore_snapshot(&snapshot).is_err());

        let mut snapshot = snapshot_of(&completed_flow());
        if let Some(summary) = snapshot.confirmation.as_mut() {
            summary.subtotal = Won::new(1000);
            summary.final_total = Won::new(6000);
        }
        assert!(restore_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_snapshot_rejects_confirmation_items_mismatch() {
        let mut snapshot = snapshot_of(&completed_flow());
        if let Some(summary) = snapshot.confirmation.as_mut() {
            summary.items[0].quantity = 5;
        }
        assert!(matches!(
            restore_snapshot(&snapshot).unwrap_err(),
            FlowError::Snapshot(_)
        ));
    }

    #[test]
    fn test_snapshot_rejects_details_before_completion() {
        let mut flow = OrderFlow::new();
        flow.begin().unwrap();
        flow.adjust_quantity(&id("bbq-olive"), 1).unwrap();
        flow.checkout().unwrap();
        let clean = snapshot_of(&flow);
        assert!(restore_snapshot(&clean).is_ok());

        let mut snapshot = clean.clone();
        snapshot.record.wechat_id = "wx_tourist".to_string();
        assert!(restore_snapshot(&snapshot).is_err());

        let mut snapshot = clean.clone();
        snapshot.record.note = "spicy".to_string();
        assert!(restore_snapshot(&snapshot).is_err());

        let mut snapshot = clean;
        snapshot.record.address_image =
            Some(AddressImage::new("image/png", "data:image/png;base64,AA"));
        assert!(restore_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_snapshot_rejects_unknown_items() {
        let mut flow = OrderFlow::new();
        flow.begin().unwrap();
        flow.adjust_quantity(&id("bbq-olive"), 1).unwrap();
        flow.checkout().unwrap();
        let json = flow.to_json().unwrap().replace("bbq-olive", "ghost");

        let mut other = OrderFlow::new();
        assert!(matches!(
            other.restore_json(&json).unwrap_err(),
            FlowError::Snapshot(_)
        ));
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        let mut flow = OrderFlow::new();
        assert!(matches!(
            flow.restore_json("nope").unwrap_err(),
            FlowError::Serde(_)
        ));
    }
}
