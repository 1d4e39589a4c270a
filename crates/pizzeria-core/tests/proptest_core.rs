//! Property-based tests for the pizzeria core.
//!
//! Uses proptest to generate random seeds, tick sequences and tunings, then
//! verify the rules that must hold regardless of timing.

use pizzeria_core::config::RestaurantConfig;
use pizzeria_core::engine::Restaurant;
use pizzeria_core::fixed::{Seconds, secs};
use pizzeria_core::ingredient::IngredientKind;
use pizzeria_core::order::{Order, OrderSampling};
use pizzeria_core::patience::PatienceTimer;
use pizzeria_core::pizza::{CookState, CookTimer};
use pizzeria_core::progression::level_for_day;
use pizzeria_core::rng::SimRng;
use pizzeria_core::test_utils::*;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

/// Frame times between 1ms and 2s, in whole milliseconds.
fn arb_dt() -> impl Strategy<Value = Seconds> {
    (1u32..2000).prop_map(|ms| Seconds::from_num(ms) / 1000)
}

fn arb_sampling() -> impl Strategy<Value = OrderSampling> {
    prop_oneof![
        Just(OrderSampling::TrialsWithRepeats),
        Just(OrderSampling::UniformSubset),
    ]
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Orders always contain every required topping and nothing outside
    /// the menu.
    #[test]
    fn orders_stay_on_the_menu(seed in any::<u64>(), sampling in arb_sampling()) {
        let required = [IngredientKind::Cheese, IngredientKind::Sauce];
        let optional = [
            IngredientKind::Bacon,
            IngredientKind::Pepperoni,
            IngredientKind::Pineapple,
        ];
        let mut rng = SimRng::new(seed);
        for _ in 0..16 {
            let order = Order::generate(&required, &optional, sampling, &mut rng);
            for kind in required {
                prop_assert!(order.contains(kind));
            }
            for kind in order.ingredients() {
                prop_assert!(required.contains(kind) || optional.contains(kind));
            }
        }
    }

    /// Cook state never goes backwards and always agrees with total heat.
    #[test]
    fn cook_state_is_monotone(dts in proptest::collection::vec(arb_dt(), 1..40)) {
        let mut timer = CookTimer::new(secs(5), secs(10));
        let mut total = Seconds::ZERO;
        let mut last = timer.state();
        for dt in dts {
            timer.advance(dt);
            total += dt;
            let state = timer.state();
            prop_assert!(state >= last);
            let expected = if total >= secs(10) {
                CookState::Burnt
            } else if total >= secs(5) {
                CookState::Cooked
            } else {
                CookState::Raw
            };
            prop_assert_eq!(state, expected);
            last = state;
        }
    }

    /// However the frames are sliced, patience fires exactly once.
    #[test]
    fn patience_fires_once(
        total in 1i32..120,
        dts in proptest::collection::vec(arb_dt(), 1..50),
    ) {
        let mut timer = PatienceTimer::new();
        timer.start(secs(total));
        let mut fired = 0;
        let mut elapsed = Seconds::ZERO;
        // Keep ticking well past expiry.
        while elapsed < secs(total) + secs(5) {
            for dt in &dts {
                if timer.tick(*dt) {
                    fired += 1;
                }
                elapsed += *dt;
            }
        }
        prop_assert_eq!(fired, 1);
        prop_assert!(timer.is_expired());
    }

    /// Level never decreases as days go by and stays within 1..=max.
    #[test]
    fn level_is_monotone_and_capped(days_per_level in 1u32..15, max_level in 1u32..10) {
        let mut last = 1;
        for day in 1..200 {
            let level = level_for_day(day, days_per_level, max_level);
            prop_assert!(level >= last);
            prop_assert!((1..=max_level).contains(&level));
            last = level;
        }
        prop_assert_eq!(last, max_level);
    }

    /// A snapshot taken before anyone has left replays identically.
    #[test]
    fn snapshot_round_trip_preserves_hash(
        seed in any::<u64>(),
        dts in proptest::collection::vec(arb_dt(), 1..40),
    ) {
        let mut r = restaurant_with(RestaurantConfig {
            seed,
            ..RestaurantConfig::default()
        });
        for dt in &dts {
            r.tick(*dt);
        }
        let mut restored = Restaurant::deserialize(&r.serialize().unwrap()).unwrap();
        prop_assert_eq!(restored.state_hash(), r.state_hash());

        for dt in &dts {
            r.tick(*dt);
            restored.tick(*dt);
        }
        prop_assert_eq!(restored.state_hash(), r.state_hash());
    }

    /// Seats are never double-booked, whatever the spawn timing.
    #[test]
    fn seats_never_double_booked(
        seed in any::<u64>(),
        dts in proptest::collection::vec(arb_dt(), 1..200),
    ) {
        let mut r = restaurant_with(RestaurantConfig {
            seed,
            customers_per_level: 5,
            ..RestaurantConfig::default()
        });
        for dt in dts {
            r.tick(dt);
            let mut held: Vec<_> = r
                .seats()
                .iter()
                .filter_map(|(_, seat)| seat.occupant())
                .collect();
            let before = held.len();
            held.sort();
            held.dedup();
            prop_assert_eq!(held.len(), before);
            prop_assert!(r.customer_count() <= r.seats().len());
        }
    }
}
