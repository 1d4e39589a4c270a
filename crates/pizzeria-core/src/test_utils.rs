//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::RestaurantConfig;
use crate::engine::Restaurant;
use crate::error::RestaurantError;
use crate::event::{Event, EventKind};
use crate::fixed::{Fixed64, Seconds};
use crate::id::{CustomerId, PizzaId};
use crate::ingredient::IngredientKind;

// ===========================================================================
// Fixed-point helper
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

// ===========================================================================
// Restaurant builders
// ===========================================================================

/// Stock tuning with automatic spawning switched off, so tests decide
/// exactly who walks in.
pub fn quiet_config() -> RestaurantConfig {
    RestaurantConfig {
        auto_spawn: false,
        ..RestaurantConfig::default()
    }
}

pub fn quiet_restaurant() -> Restaurant {
    restaurant_with(quiet_config())
}

/// Build a restaurant, panicking on an invalid config.
pub fn restaurant_with(config: RestaurantConfig) -> Restaurant {
    match Restaurant::new(config) {
        Ok(r) => r,
        Err(err) => panic!("test config rejected: {err}"),
    }
}

// ===========================================================================
// Driving the simulation
// ===========================================================================

/// Tick in `dt` increments until `total` has elapsed. Returns steps run.
pub fn tick_for(r: &mut Restaurant, total: Seconds, dt: Seconds) -> u64 {
    let mut elapsed = Seconds::ZERO;
    let mut steps = 0;
    while elapsed < total {
        steps += r.tick(dt).steps_run;
        elapsed += dt;
    }
    steps
}

/// Spawn a customer and tick until they have sat down and ordered.
pub fn seat_next_customer(r: &mut Restaurant) -> Result<CustomerId, RestaurantError> {
    let id = r.spawn_customer()?;
    let approach = r.config().approach_duration;
    r.tick(approach);
    Ok(id)
}

/// Build a pizza with `toppings`, bake it in the first oven until cooked,
/// and take it out.
pub fn bake_pizza(
    r: &mut Restaurant,
    toppings: &[IngredientKind],
) -> Result<PizzaId, RestaurantError> {
    let pizza = r.create_pizza()?;
    for &kind in toppings {
        r.add_ingredient(pizza, kind)?;
    }
    let oven = r.oven_ids()[0];
    r.place_in_oven(oven, crate::ingredient::HeldItem::Pizza(pizza))?;
    let cook = r.config().cook_duration;
    r.tick(cook);
    r.take_from_oven(oven)?;
    Ok(pizza)
}

/// Bake exactly what `customer` ordered.
pub fn bake_order(r: &mut Restaurant, customer: CustomerId) -> Result<PizzaId, RestaurantError> {
    let toppings: Vec<IngredientKind> = r
        .customer(customer)
        .and_then(|c| c.order())
        .map(|o| o.ingredients().iter().copied().collect())
        .unwrap_or_default();
    bake_pizza(r, &toppings)
}

// ===========================================================================
// Event capture
// ===========================================================================

/// Record every delivered event of `kind`.
pub fn record_events(r: &mut Restaurant, kind: EventKind) -> Rc<RefCell<Vec<Event>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    r.on_passive(
        kind,
        Box::new(move |event: &Event| sink.borrow_mut().push(event.clone())),
    );
    log
}
