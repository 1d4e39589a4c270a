//! Tuning for a restaurant shift.
//!
//! Every constant the simulation uses lives here; nothing is hard-coded in
//! the state machines. `Default` reproduces the stock game tuning. Data
//! files are turned into a `RestaurantConfig` by the `pizzeria-data` crate.

use serde::{Deserialize, Serialize};

use crate::fixed::{Seconds, f64_to_fixed64, secs};
use crate::id::Location;
use crate::ingredient::IngredientKind;
use crate::order::{MatchPolicy, OrderSampling};
use crate::sim::TickStrategy;

/// Errors found by [`RestaurantConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("burn duration must be greater than cook duration")]
    BurnNotAfterCook,
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("{0} must be at least 1")]
    Zero(&'static str),
    #[error("the restaurant needs at least one seat")]
    NoSeats,
    #[error("the customer name list is empty")]
    NoNames,
    #[error("seat location {0:?} appears more than once")]
    DuplicateSeat(Location),
    #[error("{0} cannot go on a pizza")]
    NotATopping(IngredientKind),
}

/// Full restaurant configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantConfig {
    /// Seed for the simulation RNG (orders, seat picks, names).
    pub seed: u64,
    pub tick_strategy: TickStrategy,

    // -- Kitchen --
    /// Oven time from raw to cooked.
    pub cook_duration: Seconds,
    /// Oven time from raw to burnt. Must exceed `cook_duration`.
    pub burn_duration: Seconds,
    pub blend_duration: Seconds,
    pub ovens: u32,

    // -- Orders --
    pub required_ingredients: Vec<IngredientKind>,
    pub optional_ingredients: Vec<IngredientKind>,
    pub order_sampling: OrderSampling,
    pub match_policy: MatchPolicy,

    // -- Customers --
    /// Patience granted to customers at the start of a shift.
    pub base_patience: Seconds,
    /// Patience lost by every later customer after each failed order.
    pub patience_penalty: Seconds,
    /// The patience budget never drops below this.
    pub min_patience: Seconds,
    pub customer_names: Vec<String>,
    pub seats: Vec<Location>,
    pub entry: Location,
    pub exit: Location,
    /// Walk from the entry to the seat.
    pub approach_duration: Seconds,
    /// Turn away from the counter before walking out.
    pub turn_duration: Seconds,
    /// Walk from the seat to the exit.
    pub exit_walk_duration: Seconds,
    /// How long a happy customer lingers before leaving.
    pub celebrate_duration: Seconds,

    // -- Spawning --
    pub auto_spawn: bool,
    pub spawn_interval: Seconds,
    /// Simultaneous customers allowed per level (bounded by seats).
    pub customers_per_level: u32,

    // -- Progression --
    pub day_duration: Seconds,
    pub days_per_level: u32,
    pub max_level: u32,

    // -- Player --
    pub max_health: u32,
    pub damage_per_failure: u32,

    /// Ring buffer capacity per event kind.
    pub event_buffer_capacity: usize,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_F00D,
            tick_strategy: TickStrategy::Variable,
            cook_duration: secs(5),
            burn_duration: secs(10),
            blend_duration: secs(2),
            ovens: 1,
            required_ingredients: vec![IngredientKind::Cheese, IngredientKind::Sauce],
            optional_ingredients: vec![
                IngredientKind::Bacon,
                IngredientKind::Pepperoni,
                IngredientKind::Pineapple,
            ],
            order_sampling: OrderSampling::TrialsWithRepeats,
            match_policy: MatchPolicy::Superset,
            base_patience: secs(90),
            patience_penalty: secs(5),
            min_patience: secs(30),
            customer_names: default_names(),
            seats: vec![Location(0), Location(1), Location(2)],
            entry: Location(100),
            exit: Location(101),
            approach_duration: secs(3),
            turn_duration: f64_to_fixed64(0.5),
            exit_walk_duration: secs(3),
            celebrate_duration: f64_to_fixed64(1.5),
            auto_spawn: true,
            spawn_interval: secs(2),
            customers_per_level: 2,
            day_duration: secs(60),
            days_per_level: 7,
            max_level: 5,
            max_health: 100,
            damage_per_failure: 20,
            event_buffer_capacity: 256,
        }
    }
}

fn default_names() -> Vec<String> {
    [
        "Aaron", "Adam", "Alice", "Bob", "Charlie", "Diana", "Evyevy", "Ethan", "Fiona",
        "Gandalf", "Gordon", "Hannah", "Hobbit", "Ivy", "Jack", "Joe", "Joseph", "Kira", "Liam",
        "Max", "Mia", "Nora", "Oscar", "Penny", "Quinn", "Riley", "Sam", "Shrek",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl RestaurantConfig {
    /// Check the cross-field constraints the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("cook_duration", self.cook_duration),
            ("base_patience", self.base_patience),
            ("day_duration", self.day_duration),
            ("spawn_interval", self.spawn_interval),
        ] {
            if value <= Seconds::ZERO {
                return Err(ConfigError::NonPositive(name));
            }
        }
        for (name, value) in [
            ("patience_penalty", self.patience_penalty),
            ("min_patience", self.min_patience),
            ("blend_duration", self.blend_duration),
            ("approach_duration", self.approach_duration),
            ("turn_duration", self.turn_duration),
            ("exit_walk_duration", self.exit_walk_duration),
            ("celebrate_duration", self.celebrate_duration),
        ] {
            if value < Seconds::ZERO {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if self.burn_duration <= self.cook_duration {
            return Err(ConfigError::BurnNotAfterCook);
        }
        for (name, value) in [
            ("days_per_level", self.days_per_level),
            ("max_level", self.max_level),
            ("customers_per_level", self.customers_per_level),
            ("ovens", self.ovens),
            ("max_health", self.max_health),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero(name));
            }
        }
        if self.seats.is_empty() {
            return Err(ConfigError::NoSeats);
        }
        for (i, seat) in self.seats.iter().enumerate() {
            if self.seats[..i].contains(seat) {
                return Err(ConfigError::DuplicateSeat(*seat));
            }
        }
        if self.customer_names.is_empty() {
            return Err(ConfigError::NoNames);
        }
        if let Some(kind) = self
            .required_ingredients
            .iter()
            .chain(&self.optional_ingredients)
            .find(|kind| !kind.is_topping())
        {
            return Err(ConfigError::NotATopping(*kind));
        }
        Ok(())
    }
}
