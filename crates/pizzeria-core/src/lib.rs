//! Pizzeria Core -- the simulation engine for a pizza restaurant game.
//!
//! This crate holds the game rules with no rendering, input or audio:
//! customers who walk in, order and wait; pizzas that cook and burn; the
//! ovens and blender; patience; and the day/level progression. A host
//! engine drives it by calling [`engine::Restaurant::tick`] once per frame
//! and reacting to the events it emits.
//!
//! # Seven-Phase Step Pipeline
//!
//! Each simulation step runs:
//!
//! 1. **Pre-tick** -- Apply queued [`command_queue::Command`]s.
//! 2. **Spawn** -- Top up customers to the current level's target.
//! 3. **Kitchen** -- Ovens heat their pizzas; the blender turns tomatoes into sauce.
//! 4. **Customers** -- Walking, patience countdowns, celebrations, departures.
//! 5. **Progression** -- The day clock; day and level changes.
//! 6. **Post-tick** -- Deliver buffered events and collect reactive commands.
//! 7. **Bookkeeping** -- Increment the step counter and compute the state hash.
//!
//! # Customer Lifecycle
//!
//! ```text
//! Approaching --(reach seat)--> Seated --(correct pizza)--> Served --> Leaving --> Removed
//!                                  |
//!                                  +--(wrong pizza / patience out)----> Leaving --> Removed
//! ```
//!
//! Every customer's order is resolved exactly once.
//!
//! # Key Types
//!
//! - [`engine::Restaurant`] -- Owns all state and runs the pipeline.
//! - [`customer::Customer`] -- The per-customer state machine.
//! - [`pizza::CookTimer`] -- Raw, cooked and burnt as a function of oven time.
//! - [`patience::PatienceTimer`] -- A countdown that fires once.
//! - [`progression::Progression`] -- Day counter, level and tallies.
//! - [`config::RestaurantConfig`] -- Every tuning constant.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic time.
//! - [`event::EventBus`] -- Subscription-based event bus with buffered delivery.
//! - [`serialize`] -- Versioned snapshots via bitcode.

pub mod blender;
pub mod cheats;
pub mod command_queue;
pub mod config;
pub mod customer;
pub mod engine;
pub mod error;
pub mod event;
pub mod fixed;
pub mod health;
pub mod id;
pub mod ingredient;
pub mod order;
pub mod oven;
pub mod patience;
pub mod pizza;
pub mod progression;
pub mod query;
pub mod rng;
pub mod seat;
pub mod serialize;
pub mod sim;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
