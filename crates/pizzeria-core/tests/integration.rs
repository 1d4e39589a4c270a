//! Integration tests for the pizzeria simulation.
//!
//! These exercise whole shifts through the public API: customers arriving,
//! the kitchen, serving, patience running out, progression, snapshots and
//! determinism.

use pizzeria_core::cheats::CheatKind;
use pizzeria_core::config::RestaurantConfig;
use pizzeria_core::customer::{CustomerState, Resolution};
use pizzeria_core::engine::Restaurant;
use pizzeria_core::error::RestaurantError;
use pizzeria_core::event::{Event, EventKind};
use pizzeria_core::fixed::{Seconds, secs};
use pizzeria_core::ingredient::HeldItem;
use pizzeria_core::ingredient::IngredientKind::*;
use pizzeria_core::order::MatchPolicy;
use pizzeria_core::oven::OvenDisplay;
use pizzeria_core::sim::TickStrategy;
use pizzeria_core::test_utils::*;

// ===========================================================================
// Test 1: Full service round trip
// ===========================================================================
//
// Customer walks in, sits, orders; the player bakes the order and serves it.
// The order resolves once as Served, the seat frees up immediately, and the
// customer is gone after celebrating and walking out.

#[test]
fn served_customer_resolves_once_and_frees_seat() {
    let mut r = quiet_restaurant();
    let resolved = record_events(&mut r, EventKind::OrderResolved);
    let departed = record_events(&mut r, EventKind::CustomerDeparted);

    let id = seat_next_customer(&mut r).unwrap();
    assert_eq!(r.customer(id).unwrap().state(), CustomerState::Seated);
    assert_eq!(r.seats().free_count(), 2);

    let pizza = bake_order(&mut r, id).unwrap();
    let outcome = r.serve(id, HeldItem::Pizza(pizza)).unwrap();
    assert_eq!(outcome, Some(Resolution::Served));
    assert_eq!(r.seats().free_count(), 3);
    assert!(r.pizza(pizza).is_none());

    tick_for(&mut r, secs(10), secs(1));

    assert!(r.customer(id).is_none());
    assert_eq!(r.progression().served(), 1);
    assert_eq!(r.progression().failed(), 0);
    assert_eq!(r.health().current(), 100);

    let resolved = resolved.borrow();
    assert_eq!(resolved.len(), 1);
    assert!(matches!(
        resolved[0],
        Event::OrderResolved {
            customer,
            resolution: Resolution::Served,
            ..
        } if customer == id
    ));
    assert!(matches!(
        departed.borrow()[0],
        Event::CustomerDeparted {
            succeeded: true,
            ..
        }
    ));
}

// ===========================================================================
// Test 2: Patience runs out exactly once
// ===========================================================================

#[test]
fn patience_expiry_fires_once() {
    let mut r = quiet_restaurant();
    let expired = record_events(&mut r, EventKind::PatienceExpired);
    let resolved = record_events(&mut r, EventKind::OrderResolved);

    let id = seat_next_customer(&mut r).unwrap();
    tick_for(&mut r, secs(89), secs(1));
    assert!(r.customer(id).unwrap().is_waiting());
    assert!(expired.borrow().is_empty());

    tick_for(&mut r, secs(30), secs(1));

    assert_eq!(expired.borrow().len(), 1);
    assert_eq!(resolved.borrow().len(), 1);
    assert!(matches!(
        resolved.borrow()[0],
        Event::OrderResolved {
            resolution: Resolution::Abandoned,
            ..
        }
    ));
    assert!(r.customer(id).is_none());
    assert_eq!(r.progression().failed(), 1);
    assert_eq!(r.health().current(), 80);
    assert_eq!(r.patience_budget(), secs(85));
}

// ===========================================================================
// Test 3: Wrong pizza
// ===========================================================================

#[test]
fn wrong_pizza_is_rejected_and_hurts() {
    let mut r = quiet_restaurant();
    let damage = record_events(&mut r, EventKind::PlayerDamaged);
    let id = seat_next_customer(&mut r).unwrap();

    // Every order includes sauce.
    let pizza = bake_pizza(&mut r, &[Cheese]).unwrap();
    let outcome = r.serve(id, HeldItem::Pizza(pizza)).unwrap();
    assert_eq!(outcome, Some(Resolution::Rejected));
    assert_eq!(r.customer(id).unwrap().state(), CustomerState::Leaving);

    tick_for(&mut r, secs(5), secs(1));
    assert!(r.customer(id).is_none());
    assert_eq!(r.progression().failed(), 1);
    assert!(matches!(
        damage.borrow()[0],
        Event::PlayerDamaged {
            amount: 20,
            remaining: 80,
            ..
        }
    ));
}

#[test]
fn match_policy_decides_extra_toppings() {
    let config = RestaurantConfig {
        optional_ingredients: vec![],
        ..quiet_config()
    };

    let mut lenient = restaurant_with(config.clone());
    let id = seat_next_customer(&mut lenient).unwrap();
    let order = lenient.customer(id).unwrap().order().unwrap().clone();
    assert_eq!(order.describe(), "Sauce, Cheese");
    let pizza = bake_pizza(&mut lenient, &[Sauce, Cheese, Bacon]).unwrap();
    assert_eq!(
        lenient.serve(id, HeldItem::Pizza(pizza)).unwrap(),
        Some(Resolution::Served)
    );

    let mut strict = restaurant_with(RestaurantConfig {
        match_policy: MatchPolicy::Exact,
        ..config
    });
    let id = seat_next_customer(&mut strict).unwrap();
    let pizza = bake_pizza(&mut strict, &[Sauce, Cheese, Bacon]).unwrap();
    assert_eq!(
        strict.serve(id, HeldItem::Pizza(pizza)).unwrap(),
        Some(Resolution::Rejected)
    );
}

// ===========================================================================
// Test 4: Resolution and seating errors
// ===========================================================================

#[test]
fn resolving_twice_is_an_invariant_violation() {
    let mut r = quiet_restaurant();
    let id = seat_next_customer(&mut r).unwrap();
    r.resolve_customer(id, true).unwrap();
    assert!(matches!(
        r.resolve_customer(id, false),
        Err(RestaurantError::InvariantViolation(_))
    ));
    assert_eq!(r.progression().total(), 1);
    assert_eq!(r.seats().free_count(), 3);
}

#[test]
fn full_house_reports_seat_unavailable() {
    let mut r = quiet_restaurant();
    for _ in 0..3 {
        r.spawn_customer().unwrap();
    }
    assert_eq!(r.spawn_customer(), Err(RestaurantError::SeatUnavailable));

    // Everyone sits in a distinct seat.
    tick_for(&mut r, secs(3), secs(1));
    let mut seats: Vec<_> = r.customers().map(|(_, c)| c.seat()).collect();
    seats.sort();
    seats.dedup();
    assert_eq!(seats.len(), 3);
    assert_eq!(r.waiting_count(), 3);
}

// ===========================================================================
// Test 5: Kitchen
// ===========================================================================

#[test]
fn tomato_to_sauce_to_pizza() {
    let mut r = quiet_restaurant();
    let blended = record_events(&mut r, EventKind::BlendFinished);

    let err = r.start_blend(HeldItem::Ingredient(Cheese)).unwrap_err();
    assert_eq!(err.player_message(), Some("You can only blend tomatoes!"));

    r.start_blend(HeldItem::Ingredient(Tomato)).unwrap();
    r.tick(secs(2));
    assert_eq!(blended.borrow().len(), 1);
    let sauce = r.take_blended().unwrap();
    assert_eq!(sauce, Sauce);

    let pizza = r.create_pizza().unwrap();
    r.add_ingredient(pizza, sauce).unwrap();
    r.add_ingredient(pizza, Cheese).unwrap();
    assert!(r.add_ingredient(pizza, Tomato).is_err());

    let oven = r.oven_ids()[0];
    assert_eq!(r.oven_display(oven).unwrap().to_string(), "00:00");
    r.place_in_oven(oven, HeldItem::Pizza(pizza)).unwrap();
    assert_eq!(r.oven_display(oven).unwrap().to_string(), "00:05");

    r.tick(secs(5));
    assert_eq!(r.oven_display(oven).unwrap(), OvenDisplay::Ready);
    let err = r.add_ingredient(pizza, Bacon).unwrap_err();
    assert_eq!(err.player_message(), Some("Take the pizza out of the oven first!"));

    r.tick(secs(5));
    assert_eq!(r.oven_display(oven).unwrap().to_string(), "BURNT!");
}

#[test]
fn god_mode_serves_anything() {
    let mut r = quiet_restaurant();
    r.set_cheat(CheatKind::GodMode, true);
    let id = seat_next_customer(&mut r).unwrap();
    let raw = r.create_pizza().unwrap();
    assert_eq!(
        r.serve(id, HeldItem::Pizza(raw)).unwrap(),
        Some(Resolution::Served)
    );
}

// ===========================================================================
// Test 6: Progression
// ===========================================================================

#[test]
fn levels_follow_days_and_cap() {
    let mut r = quiet_restaurant();
    let levels = record_events(&mut r, EventKind::LevelChanged);
    let days = record_events(&mut r, EventKind::DayChanged);

    for _ in 0..7 {
        r.advance_day();
    }
    assert_eq!((r.day(), r.level()), (8, 2));

    for _ in 8..36 {
        r.advance_day();
    }
    assert_eq!((r.day(), r.level()), (36, 5));
    assert_eq!(r.level_name(), "Expert");

    r.tick(Seconds::ZERO);
    let changes: Vec<(u32, u32)> = levels
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::LevelChanged { old, new, .. } => Some((*old, *new)),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![(1, 2), (2, 3), (3, 4), (4, 5)]);
    assert_eq!(days.borrow().len(), 35);
}

#[test]
fn higher_level_admits_more_customers() {
    let config = RestaurantConfig {
        seats: (0..8).map(pizzeria_core::id::Location).collect(),
        ..RestaurantConfig::default()
    };
    let mut r = restaurant_with(config);
    r.tick(secs(1));
    assert_eq!(r.customer_count(), 2);

    for _ in 0..7 {
        r.advance_day();
    }
    assert_eq!(r.spawn_target(), 4);
    r.tick(secs(2));
    assert_eq!(r.customer_count(), 4);
}

// ===========================================================================
// Test 7: Game over
// ===========================================================================

#[test]
fn game_over_is_announced_and_halts_the_shift() {
    let mut r = restaurant_with(RestaurantConfig {
        max_health: 40,
        ..quiet_config()
    });
    let over = record_events(&mut r, EventKind::GameOver);

    for _ in 0..2 {
        let id = seat_next_customer(&mut r).unwrap();
        let raw = r.create_pizza().unwrap();
        r.serve(id, HeldItem::Pizza(raw)).unwrap();
    }
    assert!(r.is_game_over());
    assert_eq!(r.spawn_customer(), Err(RestaurantError::GameOver));

    assert_eq!(r.tick(secs(1)).steps_run, 0);
    assert_eq!(over.borrow().len(), 1);

    r.restart();
    assert_eq!(r.health().current(), 40);
    assert_eq!(r.day(), 1);
    assert!(seat_next_customer(&mut r).is_ok());
}

// ===========================================================================
// Test 8: Snapshots and determinism
// ===========================================================================

#[test]
fn snapshot_resumes_mid_shift() {
    let mut original = restaurant_with(RestaurantConfig::default());
    tick_for(&mut original, secs(20), secs(1));

    let data = original.serialize().unwrap();
    let mut restored = Restaurant::deserialize(&data).unwrap();
    assert_eq!(restored.state_hash(), original.state_hash());
    assert_eq!(restored.customer_count(), original.customer_count());

    for _ in 0..20 {
        original.tick(secs(1));
        restored.tick(secs(1));
        assert_eq!(restored.state_hash(), original.state_hash());
    }
}

#[test]
fn same_seed_same_shift() {
    let run = |seed: u64| {
        let mut r = restaurant_with(RestaurantConfig {
            seed,
            ..RestaurantConfig::default()
        });
        tick_for(&mut r, secs(300), fixed(0.25));
        (r.state_hash(), r.progression().failed())
    };

    let (a, failed) = run(7);
    let (b, _) = run(7);
    let (c, _) = run(8);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(failed > 0);
}

#[test]
fn fixed_timestep_is_frame_rate_independent() {
    let config = RestaurantConfig {
        tick_strategy: TickStrategy::Fixed {
            timestep: fixed(0.25),
        },
        ..RestaurantConfig::default()
    };
    let mut coarse = restaurant_with(config.clone());
    let mut fine = restaurant_with(config);

    tick_for(&mut coarse, secs(60), secs(1));
    tick_for(&mut fine, secs(60), fixed(0.125));

    assert_eq!(coarse.sim_state.step, 240);
    assert_eq!(coarse.sim_state.step, fine.sim_state.step);
    assert_eq!(coarse.state_hash(), fine.state_hash());
}
