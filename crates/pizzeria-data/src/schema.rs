//! Serde data file structs for restaurant definitions.
//!
//! These structs define the on-disk format of `restaurant.{ron,toml,json}`.
//! Durations are plain `f64` seconds, seats are named, and ingredients are
//! written by name. Every field is optional: anything left out keeps the
//! stock tuning from `RestaurantConfig::default()`. The loader resolves a
//! [`RestaurantData`] into a validated config.

use pizzeria_core::order::{MatchPolicy, OrderSampling};
use serde::Deserialize;

// ===========================================================================
// Top level
// ===========================================================================

/// A whole restaurant definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestaurantData {
    pub seed: Option<u64>,
    /// Length of a fixed simulation step. Absent means one step per frame.
    pub fixed_timestep: Option<f64>,
    pub kitchen: KitchenData,
    pub menu: MenuData,
    pub customers: CustomerData,
    pub dining_room: DiningRoomData,
    pub spawning: SpawningData,
    pub progression: ProgressionData,
    pub player: PlayerData,
    pub event_buffer_capacity: Option<usize>,
}

// ===========================================================================
// Sections
// ===========================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KitchenData {
    pub cook_seconds: Option<f64>,
    pub burn_seconds: Option<f64>,
    pub blend_seconds: Option<f64>,
    pub ovens: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuData {
    /// Ingredient names every order includes.
    pub required: Option<Vec<String>>,
    /// Ingredient names orders may add.
    pub optional: Option<Vec<String>>,
    pub sampling: Option<OrderSampling>,
    pub match_policy: Option<MatchPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomerData {
    pub names: Option<Vec<String>>,
    pub base_patience: Option<f64>,
    pub patience_penalty: Option<f64>,
    pub min_patience: Option<f64>,
    pub approach_seconds: Option<f64>,
    pub turn_seconds: Option<f64>,
    pub exit_walk_seconds: Option<f64>,
    pub celebrate_seconds: Option<f64>,
}

/// Seats and doors. Names are only for humans; the core sees numbered
/// locations in the order seats are listed, followed by the entry and exit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiningRoomData {
    pub seats: Option<Vec<String>>,
    pub entry: Option<String>,
    pub exit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawningData {
    pub auto_spawn: Option<bool>,
    pub interval_seconds: Option<f64>,
    pub customers_per_level: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressionData {
    pub day_seconds: Option<f64>,
    pub days_per_level: Option<u32>,
    pub max_level: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerData {
    pub max_health: Option<u32>,
    pub damage_per_failure: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ron_is_all_defaults() {
        let data: RestaurantData = ron::from_str("()").unwrap();
        assert!(data.seed.is_none());
        assert!(data.menu.required.is_none());
        assert!(data.dining_room.seats.is_none());
    }

    #[test]
    fn sections_parse_from_toml() {
        let data: RestaurantData = toml::from_str(
            r#"
seed = 42
fixed_timestep = 0.02

[kitchen]
cook_seconds = 4.5
ovens = 2

[menu]
required = ["cheese", "sauce"]
optional = ["bacon"]
sampling = "uniform_subset"
match_policy = "exact"

[dining_room]
seats = ["window", "bar"]
"#,
        )
        .unwrap();
        assert_eq!(data.seed, Some(42));
        assert_eq!(data.kitchen.ovens, Some(2));
        assert_eq!(data.menu.sampling, Some(OrderSampling::UniformSubset));
        assert_eq!(data.menu.match_policy, Some(MatchPolicy::Exact));
        assert_eq!(data.dining_room.seats.unwrap().len(), 2);
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<RestaurantData, _> =
            serde_json::from_str(r#"{ "kitchen": { "microwaves": 3 } }"#);
        assert!(result.is_err());
    }
}
