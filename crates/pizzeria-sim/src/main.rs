//! Headless pizzeria shift.
//!
//! Loads a restaurant definition (or the stock tuning), then runs a shift at
//! a fixed frame rate with a simple scripted cook taking orders one at a
//! time. Everything that happens is logged.
//!
//! Usage: `pizzeria-sim [DATA_DIR] [MINUTES]`. Set `RUST_LOG=debug` for
//! per-customer detail.

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use pizzeria_core::config::RestaurantConfig;
use pizzeria_core::engine::Restaurant;
use pizzeria_core::error::RestaurantError;
use pizzeria_core::event::{Event, EventKind};
use pizzeria_core::fixed::{f64_to_fixed64, fixed64_to_f64};
use pizzeria_core::id::{CustomerId, OvenId, PizzaId};
use pizzeria_core::ingredient::{HeldItem, IngredientKind};
use pizzeria_core::oven::Oven;
use pizzeria_core::pizza::{CookState, Pizza};
use pizzeria_data::{RestaurantDefinition, load_restaurant};

const FRAME_RATE: f64 = 60.0;
const DEFAULT_MINUTES: f64 = 10.0;

// ===========================================================================
// Scripted cook
// ===========================================================================

/// One order in progress.
#[derive(Debug, Clone, Copy)]
struct Job {
    customer: CustomerId,
    pizza: PizzaId,
    oven: Option<OvenId>,
}

/// Works the order board top to bottom, one pizza at a time.
#[derive(Debug, Default)]
struct Cook {
    job: Option<Job>,
}

impl Cook {
    fn act(&mut self, r: &mut Restaurant) -> Result<(), RestaurantError> {
        if !r.blender().is_blending() && r.blender().ready() == 0 {
            r.start_blend(HeldItem::Ingredient(IngredientKind::Tomato))?;
        }
        let current = self.job;
        let next = match current {
            None => self.take_order(r),
            Some(job) => self.work(r, job),
        };
        // On failure the job stays as it was and is retried next frame.
        self.job = next?;
        Ok(())
    }

    fn take_order(&self, r: &mut Restaurant) -> Result<Option<Job>, RestaurantError> {
        let Some(row) = r.order_board().into_iter().next() else {
            return Ok(None);
        };
        let toppings: Vec<IngredientKind> = r
            .customer(row.customer)
            .and_then(|c| c.order())
            .map(|o| o.ingredients().iter().copied().collect())
            .unwrap_or_default();
        if toppings.contains(&IngredientKind::Sauce) && r.blender().ready() == 0 {
            // Wait for the blender.
            return Ok(None);
        }

        let pizza = r.create_pizza()?;
        for kind in toppings {
            if kind == IngredientKind::Sauce {
                r.take_blended();
            }
            if let Err(err) = r.add_ingredient(pizza, kind) {
                r.discard_pizza(pizza)?;
                return Err(err);
            }
        }
        log::debug!("cook starts {}'s pizza: {}", row.name, row.order);
        Ok(Some(Job {
            customer: row.customer,
            pizza,
            oven: None,
        }))
    }

    fn work(&self, r: &mut Restaurant, job: Job) -> Result<Option<Job>, RestaurantError> {
        if r.customer(job.customer).is_none_or(|c| !c.is_waiting()) {
            r.discard_pizza(job.pizza)?;
            return Ok(None);
        }

        let Some(oven) = job.oven else {
            let free = r
                .oven_ids()
                .into_iter()
                .find(|&id| r.oven(id).is_some_and(Oven::is_empty));
            let Some(oven) = free else {
                return Ok(Some(job));
            };
            r.place_in_oven(oven, HeldItem::Pizza(job.pizza))?;
            return Ok(Some(Job {
                oven: Some(oven),
                ..job
            }));
        };

        if r.pizza(job.pizza).map(Pizza::cook_state) != Some(CookState::Cooked) {
            return Ok(Some(job));
        }
        r.take_from_oven(oven)?;
        r.serve(job.customer, HeldItem::Pizza(job.pizza))?;
        Ok(None)
    }
}

// ===========================================================================
// Event logging
// ===========================================================================

fn log_events(r: &mut Restaurant, definition: &RestaurantDefinition) {
    let places = definition.clone();
    r.on_passive(
        EventKind::CustomerSpawned,
        Box::new(move |event| {
            if let Event::CustomerSpawned {
                customer, location, ..
            } = event
            {
                log::debug!(
                    "customer {customer:?} heads to {}",
                    places.location_name(*location)
                );
            }
        }),
    );
    r.on_passive(
        EventKind::OrderResolved,
        Box::new(|event| {
            if let Event::OrderResolved {
                customer,
                resolution,
                step,
            } = event
            {
                log::info!("step {step}: customer {customer:?} {resolution:?}");
            }
        }),
    );
    r.on_passive(
        EventKind::LevelChanged,
        Box::new(|event| {
            if let Event::LevelChanged { new, .. } = event {
                log::info!("the restaurant reached level {new}");
            }
        }),
    );
    r.on_passive(
        EventKind::GameOver,
        Box::new(|event| {
            if let Event::GameOver { step } = event {
                log::warn!("game over at step {step}");
            }
        }),
    );
}

// ===========================================================================
// Main
// ===========================================================================

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let mut args = std::env::args().skip(1);
    let definition = match args.next() {
        Some(dir) => load_restaurant(Path::new(&dir))?,
        None => RestaurantDefinition {
            config: RestaurantConfig::default(),
            location_names: HashMap::new(),
        },
    };
    let minutes: f64 = args
        .next()
        .map(|m| m.parse())
        .transpose()?
        .unwrap_or(DEFAULT_MINUTES);

    let mut restaurant = Restaurant::new(definition.config.clone())?;
    log_events(&mut restaurant, &definition);

    let frame = f64_to_fixed64(1.0 / FRAME_RATE);
    let frames = (minutes * 60.0 * FRAME_RATE) as u64;
    let mut cook = Cook::default();
    log::info!(
        "opening with {} seats for {minutes} minutes",
        restaurant.seats().len()
    );

    for _ in 0..frames {
        match cook.act(&mut restaurant) {
            Ok(()) => {}
            Err(RestaurantError::GameOver) => break,
            Err(err) => log::warn!("cook fumbled: {err}"),
        }
        restaurant.tick(frame);
        if restaurant.is_game_over() {
            // Let the final events reach the listeners.
            restaurant.tick(frame);
            break;
        }
    }

    let progression = restaurant.progression();
    println!();
    println!("Shift summary:");
    println!(
        "  Time: {:.1}s over {} steps",
        fixed64_to_f64(restaurant.sim_state.elapsed),
        restaurant.sim_state.step
    );
    println!(
        "  Day {} / level {} ({})",
        progression.day(),
        progression.level(),
        restaurant.level_name()
    );
    println!(
        "  Served {}, failed {}",
        progression.served(),
        progression.failed()
    );
    println!(
        "  Health {}/{}",
        restaurant.health().current(),
        restaurant.health().max()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_core::fixed::secs;

    fn cheese_only() -> Restaurant {
        Restaurant::new(RestaurantConfig {
            auto_spawn: false,
            required_ingredients: vec![IngredientKind::Cheese],
            optional_ingredients: Vec::new(),
            max_health: 20,
            ..RestaurantConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn cook_takes_the_first_order() {
        let mut r = cheese_only();
        let guest = r.spawn_customer().unwrap();
        r.tick(secs(3));

        let mut cook = Cook::default();
        cook.act(&mut r).unwrap();
        let job = cook.job.unwrap();
        assert_eq!(job.customer, guest);
        assert!(job.oven.is_none());
        assert!(r.blender().is_blending());
        assert!(r.pizza(job.pizza).unwrap().has(IngredientKind::Cheese));
    }

    #[test]
    fn failed_step_keeps_the_job() {
        let mut r = cheese_only();
        r.spawn_customer().unwrap();
        r.tick(secs(3));
        let mut cook = Cook::default();
        cook.act(&mut r).unwrap();
        let job = cook.job.unwrap();

        // Another guest storms off and the shift ends.
        let other = r.spawn_customer().unwrap();
        r.resolve_customer(other, false).unwrap();
        assert!(r.is_game_over());

        assert_eq!(cook.act(&mut r), Err(RestaurantError::GameOver));
        let kept = cook.job.unwrap();
        assert_eq!(kept.pizza, job.pizza);
        assert_eq!(kept.customer, job.customer);
        assert!(r.pizza(job.pizza).is_some());
    }
}
