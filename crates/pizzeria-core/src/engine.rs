//! The restaurant: owns every piece of simulation state and runs the
//! per-step pipeline.
//!
//! # Architecture
//!
//! The `Restaurant` owns:
//! - The [`RestaurantConfig`] it was built from
//! - A [`SeatPool`] and the active [`Customer`]s (keyed by [`CustomerId`])
//! - Every [`Pizza`] in play, the [`Oven`]s and the [`Blender`]
//! - [`Progression`] (day, level, tallies), [`PlayerHealth`] and [`Cheats`]
//! - A seeded [`SimRng`], a [`SimState`] and an [`EventBus`]
//!
//! # Step pipeline
//!
//! Each step runs:
//! 1. **Pre-tick** -- apply queued [`Command`]s (including reactive handler output)
//! 2. **Spawn** -- every `spawn_interval`, top up customers to the level's target
//! 3. **Kitchen** -- ovens heat their pizzas; the blender runs
//! 4. **Customers** -- walks, patience, celebrations and departures
//! 5. **Progression** -- the day clock; day and level changes
//! 6. **Post-tick** -- deliver buffered events; collect reactive commands
//! 7. **Bookkeeping** -- step counter, elapsed time, state hash
//!
//! Player actions (`serve`, `place_in_oven`, ...) apply immediately. Their
//! events are buffered and delivered at the end of the next step.

use slotmap::SlotMap;

use crate::blender::Blender;
use crate::cheats::{CheatKind, Cheats};
use crate::command_queue::{Command, CommandQueue};
use crate::config::{ConfigError, RestaurantConfig};
use crate::customer::{Customer, CustomerTick, Offering, Resolution};
use crate::error::RestaurantError;
use crate::event::{Event, EventBus, EventKind, PassiveListener, ReactiveHandler};
use crate::fixed::Seconds;
use crate::health::PlayerHealth;
use crate::id::{CustomerId, OvenId, PizzaId};
use crate::ingredient::{HeldItem, IngredientKind};
use crate::order::Order;
use crate::oven::{Oven, OvenDisplay};
use crate::pizza::{CookTransition, Pizza};
use crate::progression::{DayAdvance, Progression};
use crate::rng::SimRng;
use crate::seat::SeatPool;
use crate::sim::{SimState, StateHash, TickResult, TickStrategy};

// ---------------------------------------------------------------------------
// Restaurant
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Restaurant {
    pub(crate) config: RestaurantConfig,
    pub(crate) rng: SimRng,

    pub(crate) seats: SeatPool,
    pub(crate) customers: SlotMap<CustomerId, Customer>,

    pub(crate) pizzas: SlotMap<PizzaId, Pizza>,
    pub(crate) ovens: SlotMap<OvenId, Oven>,
    pub(crate) blender: Blender,

    pub(crate) progression: Progression,
    pub(crate) health: PlayerHealth,
    pub(crate) cheats: Cheats,

    /// Patience granted to the next customer to sit down. Shrinks with
    /// every failed order, down to `min_patience`.
    pub(crate) patience_budget: Seconds,

    /// Time accumulated towards the next spawn check.
    pub(crate) spawn_timer: Seconds,

    pub sim_state: SimState,
    pub(crate) paused: bool,
    pub(crate) game_over: bool,
    pub(crate) last_state_hash: u64,

    pub event_bus: EventBus,
    pub(crate) commands: CommandQueue,
}

impl Restaurant {
    /// Build a restaurant for a fresh shift. Fails if `config` does not
    /// validate.
    pub fn new(config: RestaurantConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut ovens = SlotMap::with_key();
        for _ in 0..config.ovens {
            ovens.insert(Oven::new());
        }

        Ok(Self {
            rng: SimRng::new(config.seed),
            seats: SeatPool::from_locations(config.seats.iter().copied()),
            customers: SlotMap::with_key(),
            pizzas: SlotMap::with_key(),
            ovens,
            blender: Blender::new(),
            progression: Progression::new(&config),
            health: PlayerHealth::new(config.max_health),
            cheats: Cheats::default(),
            patience_budget: config.base_patience,
            // The first step of a shift checks for spawns immediately.
            spawn_timer: config.spawn_interval,
            sim_state: SimState::new(),
            paused: false,
            game_over: false,
            last_state_hash: 0,
            event_bus: EventBus::new(config.event_buffer_capacity),
            commands: CommandQueue::new(),
            config,
        })
    }

    pub fn config(&self) -> &RestaurantConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Customers
    // -----------------------------------------------------------------------

    /// Bring in a new customer, bound to a random free seat.
    ///
    /// The seat is reserved immediately; the customer walks over and orders
    /// on arrival. Fails with `SeatUnavailable` when every seat is taken,
    /// which callers should treat as "try again later".
    pub fn spawn_customer(&mut self) -> Result<CustomerId, RestaurantError> {
        self.ensure_running()?;
        let Some(seat) = self.seats.pick_free(&mut self.rng) else {
            log::warn!("no free seat for a new customer");
            return Err(RestaurantError::SeatUnavailable);
        };
        let location = self
            .seats
            .get(seat)
            .map(|s| s.location)
            .ok_or(RestaurantError::SeatUnavailable)?;
        let name = self
            .rng
            .pick(&self.config.customer_names)
            .cloned()
            .unwrap_or_default();

        let config = &self.config;
        let id = self
            .customers
            .insert_with_key(|id| Customer::new(id, name, seat, location, config));
        if let Some(slot) = self.seats.get_mut(seat) {
            slot.claim(id)?;
        }

        log::debug!(
            "{} walks in, heading to seat {:?}",
            self.customers[id].name(),
            location
        );
        self.emit(Event::CustomerSpawned {
            customer: id,
            seat,
            location,
            step: self.sim_state.step,
        });
        Ok(id)
    }

    /// Settle a customer's visit and remove them from the restaurant.
    ///
    /// Tallies the outcome; a failure also shrinks the patience budget for
    /// later customers. Resolving an id that is not active (including a
    /// second resolve of the same customer) is an `InvariantViolation`, and
    /// so is contradicting an outcome the customer already reached.
    pub fn resolve_customer(
        &mut self,
        customer: CustomerId,
        succeeded: bool,
    ) -> Result<(), RestaurantError> {
        let Some(guest) = self.customers.get(customer) else {
            let err = RestaurantError::InvariantViolation(format!(
                "resolved customer {customer:?} who is not in the restaurant"
            ));
            log::error!("{err}");
            return Err(err);
        };
        match guest.resolution() {
            Some(recorded) if recorded.succeeded() != succeeded => {
                let err = RestaurantError::InvariantViolation(format!(
                    "customer {customer:?} was already resolved as {recorded:?}"
                ));
                log::error!("{err}");
                return Err(err);
            }
            Some(_) => {}
            None => {
                let resolution = if succeeded {
                    Resolution::Served
                } else {
                    Resolution::Rejected
                };
                self.on_resolution(customer, resolution);
            }
        }

        let Some(guest) = self.customers.remove(customer) else {
            return Err(RestaurantError::UnknownCustomer(customer));
        };
        self.seats.release_held_by(customer);
        self.progression.record(succeeded);
        if !succeeded {
            self.patience_budget = self
                .patience_budget
                .saturating_sub(self.config.patience_penalty)
                .max(self.config.min_patience);
        }
        log::info!(
            "{} {} (served {}, failed {})",
            guest.name(),
            if succeeded { "left happy" } else { "left unhappy" },
            self.progression.served(),
            self.progression.failed()
        );
        Ok(())
    }

    /// Hand `item` to a seated customer.
    ///
    /// Returns `Ok(None)` if the customer is not seated. A pizza is consumed
    /// whether it is accepted or rejected.
    pub fn serve(
        &mut self,
        customer: CustomerId,
        item: HeldItem,
    ) -> Result<Option<Resolution>, RestaurantError> {
        self.ensure_running()?;
        if let HeldItem::Pizza(pizza) = item {
            self.ensure_out_of_oven(pizza)?;
        }
        let policy = self.config.match_policy;
        let god_mode = self.cheats.is_active(CheatKind::GodMode);

        let guest = self
            .customers
            .get_mut(customer)
            .ok_or(RestaurantError::UnknownCustomer(customer))?;
        let offering = match item {
            HeldItem::Pizza(pizza) => Offering::Pizza(
                self.pizzas
                    .get(pizza)
                    .ok_or(RestaurantError::UnknownPizza(pizza))?,
            ),
            HeldItem::Ingredient(kind) => Offering::Ingredient(kind),
            HeldItem::Tool(tool) => Offering::Tool(tool),
        };
        let outcome = guest
            .interact(offering, policy, god_mode, &mut self.seats, &self.config)
            .map_err(refused)?;

        if let Some(resolution) = outcome {
            if let HeldItem::Pizza(pizza) = item {
                self.pizzas.remove(pizza);
            }
            self.on_resolution(customer, resolution);
        }
        Ok(outcome)
    }

    /// Announce a settled order and hurt the player if it failed.
    fn on_resolution(&mut self, customer: CustomerId, resolution: Resolution) {
        self.emit(Event::OrderResolved {
            customer,
            resolution,
            step: self.sim_state.step,
        });
        if !resolution.succeeded() {
            self.damage_player(self.config.damage_per_failure);
        }
    }

    fn damage_player(&mut self, amount: u32) {
        if amount == 0 || self.health.is_dead() {
            return;
        }
        let dealt = self.health.damage(amount);
        self.emit(Event::PlayerDamaged {
            amount: dealt,
            remaining: self.health.current(),
            step: self.sim_state.step,
        });
        if self.health.is_dead() && !self.game_over {
            self.game_over = true;
            log::warn!("game over on day {}", self.progression.day());
            self.emit(Event::GameOver {
                step: self.sim_state.step,
            });
        }
    }

    // -----------------------------------------------------------------------
    // Kitchen
    // -----------------------------------------------------------------------

    /// Fresh raw dough.
    pub fn create_pizza(&mut self) -> Result<PizzaId, RestaurantError> {
        self.ensure_running()?;
        Ok(self
            .pizzas
            .insert(Pizza::new(self.config.cook_duration, self.config.burn_duration)))
    }

    pub fn add_ingredient(
        &mut self,
        pizza: PizzaId,
        kind: IngredientKind,
    ) -> Result<(), RestaurantError> {
        self.ensure_running()?;
        self.ensure_out_of_oven(pizza)?;
        self.pizzas
            .get_mut(pizza)
            .ok_or(RestaurantError::UnknownPizza(pizza))?
            .add_ingredient(kind)
            .map_err(refused)
    }

    /// Put the held item in an oven. Only pizzas fit.
    pub fn place_in_oven(&mut self, oven: OvenId, item: HeldItem) -> Result<(), RestaurantError> {
        self.ensure_running()?;
        let HeldItem::Pizza(pizza) = item else {
            return Err(refused(RestaurantError::invalid("You can only place a pizza!")));
        };
        if !self.pizzas.contains_key(pizza) {
            return Err(RestaurantError::UnknownPizza(pizza));
        }
        self.ensure_out_of_oven(pizza)?;
        self.ovens
            .get_mut(oven)
            .ok_or(RestaurantError::UnknownOven(oven))?
            .place(pizza)
            .map_err(refused)?;
        log::debug!("pizza {pizza:?} placed in oven {oven:?}");

        if self.cheats.is_active(CheatKind::InstantCook) {
            let transition = self
                .pizzas
                .get_mut(pizza)
                .and_then(|p| p.timer_mut().apply_cheat(CheatKind::InstantCook));
            if let Some(transition) = transition {
                self.announce_cook(pizza, transition);
            }
        }
        Ok(())
    }

    /// Take whatever is in the oven. `Ok(None)` if it was empty.
    pub fn take_from_oven(&mut self, oven: OvenId) -> Result<Option<PizzaId>, RestaurantError> {
        self.ensure_running()?;
        Ok(self
            .ovens
            .get_mut(oven)
            .ok_or(RestaurantError::UnknownOven(oven))?
            .take())
    }

    /// Throw a pizza away, pulling it out of its oven first if needed.
    pub fn discard_pizza(&mut self, pizza: PizzaId) -> Result<(), RestaurantError> {
        self.pizzas
            .remove(pizza)
            .ok_or(RestaurantError::UnknownPizza(pizza))?;
        for oven in self.ovens.values_mut() {
            if oven.pizza() == Some(pizza) {
                oven.take();
            }
        }
        log::debug!("pizza {pizza:?} discarded");
        Ok(())
    }

    /// Drop the held item into the blender.
    pub fn start_blend(&mut self, item: HeldItem) -> Result<(), RestaurantError> {
        self.ensure_running()?;
        self.blender
            .start(item, self.config.blend_duration)
            .map_err(refused)
    }

    /// Pick up one portion of finished sauce.
    pub fn take_blended(&mut self) -> Option<IngredientKind> {
        self.blender.take()
    }

    fn oven_holding(&self, pizza: PizzaId) -> Option<OvenId> {
        self.ovens
            .iter()
            .find(|(_, oven)| oven.pizza() == Some(pizza))
            .map(|(id, _)| id)
    }

    fn ensure_out_of_oven(&self, pizza: PizzaId) -> Result<(), RestaurantError> {
        match self.oven_holding(pizza) {
            Some(_) => Err(refused(RestaurantError::invalid(
                "Take the pizza out of the oven first!",
            ))),
            None => Ok(()),
        }
    }

    fn announce_cook(&mut self, pizza: PizzaId, transition: CookTransition) {
        log::debug!(
            "pizza {pizza:?} went from {} to {}",
            transition.from,
            transition.to
        );
        self.emit(Event::CookStateChanged {
            pizza,
            from: transition.from,
            to: transition.to,
            step: self.sim_state.step,
        });
    }

    // -----------------------------------------------------------------------
    // Progression
    // -----------------------------------------------------------------------

    /// Start the next day now. Returns the new day number.
    pub fn advance_day(&mut self) -> u32 {
        let advance = self.progression.advance_day();
        self.announce_day(advance);
        advance.day
    }

    fn announce_day(&mut self, advance: DayAdvance) {
        let step = self.sim_state.step;
        if let Some(change) = advance.level_change {
            self.emit(Event::LevelChanged {
                old: change.old,
                new: change.new,
                step,
            });
        }
        self.emit(Event::DayChanged {
            day: advance.day,
            step,
        });
    }

    /// How many customers the spawn loop keeps in the restaurant.
    pub fn spawn_target(&self) -> usize {
        let per_level = self
            .config
            .customers_per_level
            .saturating_mul(self.progression.level()) as usize;
        per_level.min(self.seats.len())
    }

    // -----------------------------------------------------------------------
    // Cheats
    // -----------------------------------------------------------------------

    pub fn set_cheat(&mut self, kind: CheatKind, enabled: bool) {
        self.cheats.set(kind, enabled);
    }

    pub fn cheats(&self) -> Cheats {
        self.cheats
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Queue a command for the start of the next step.
    pub fn submit(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.pending_count()
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::SpawnCustomer => {
                if let Err(err) = self.spawn_customer() {
                    log::debug!("queued spawn dropped: {err}");
                }
            }
            Command::ResolveCustomer {
                customer,
                succeeded,
            } => {
                // Failures are logged by resolve_customer.
                let _ = self.resolve_customer(customer, succeeded);
            }
            Command::AdvanceDay => {
                self.advance_day();
            }
            Command::SetCheat { kind, enabled } => self.set_cheat(kind, enabled),
        }
    }

    // -----------------------------------------------------------------------
    // Event system
    // -----------------------------------------------------------------------

    pub fn suppress_event(&mut self, kind: EventKind) {
        self.event_bus.suppress(kind);
    }

    pub fn on_passive(&mut self, kind: EventKind, listener: PassiveListener) {
        self.event_bus.on_passive(kind, listener);
    }

    pub fn on_reactive(&mut self, kind: EventKind, handler: ReactiveHandler) {
        self.event_bus.on_reactive(kind, handler);
    }

    fn emit(&mut self, event: Event) {
        self.event_bus.emit(event);
    }

    // -----------------------------------------------------------------------
    // Pause / Resume / Restart
    // -----------------------------------------------------------------------

    /// While paused, `tick()` runs no steps. Player actions still work.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Start the shift over: day 1, full health, empty kitchen and dining
    /// room, RNG reseeded. Subscribers and event suppression are kept.
    pub fn restart(&mut self) {
        self.rng = SimRng::new(self.config.seed);
        self.seats.clear_occupants();
        self.customers.clear();
        self.pizzas.clear();
        for oven in self.ovens.values_mut() {
            oven.take();
        }
        self.blender = Blender::new();
        self.progression.reset();
        self.health.reset();
        self.cheats = Cheats::default();
        self.patience_budget = self.config.base_patience;
        self.spawn_timer = self.config.spawn_interval;
        self.sim_state = SimState::new();
        self.paused = false;
        self.game_over = false;
        self.last_state_hash = 0;
        self.event_bus.clear_all();
        self.commands.clear();
        log::info!("restaurant restarted");
    }

    fn ensure_running(&self) -> Result<(), RestaurantError> {
        if self.game_over {
            return Err(RestaurantError::GameOver);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance the simulation by `dt` of frame time according to the
    /// configured [`TickStrategy`]. While paused or after game over no step
    /// runs, but events from player actions are still delivered.
    pub fn tick(&mut self, dt: Seconds) -> TickResult {
        let mut result = TickResult::default();
        if self.paused || self.game_over {
            self.phase_post_tick();
            return result;
        }

        match self.config.tick_strategy.clone() {
            TickStrategy::Variable => {
                self.step_internal(dt.max(Seconds::ZERO), &mut result);
            }
            TickStrategy::Fixed { timestep } => {
                if dt > Seconds::ZERO {
                    self.sim_state.accumulator = self.sim_state.accumulator.saturating_add(dt);
                }
                let step_size = timestep.max(Seconds::DELTA);
                while self.sim_state.accumulator >= step_size && !self.game_over {
                    self.sim_state.accumulator -= step_size;
                    self.step_internal(step_size, &mut result);
                }
            }
        }

        result
    }

    fn step_internal(&mut self, dt: Seconds, result: &mut TickResult) {
        self.phase_pre_tick(result);
        self.phase_spawn(dt);
        self.phase_kitchen(dt);
        self.phase_customers(dt);
        self.phase_progression(dt);
        self.phase_post_tick();
        self.phase_bookkeeping(dt);
        result.steps_run += 1;
    }

    // -----------------------------------------------------------------------
    // Phase 1: Pre-tick
    // -----------------------------------------------------------------------

    fn phase_pre_tick(&mut self, result: &mut TickResult) {
        let commands = self.commands.drain();
        result.commands_applied += commands.len();
        for command in commands {
            self.apply_command(command);
        }
    }

    // -----------------------------------------------------------------------
    // Phase 2: Spawn
    // -----------------------------------------------------------------------

    fn phase_spawn(&mut self, dt: Seconds) {
        if !self.config.auto_spawn || self.game_over {
            return;
        }
        self.spawn_timer = self.spawn_timer.saturating_add(dt);
        while self.spawn_timer >= self.config.spawn_interval {
            self.spawn_timer -= self.config.spawn_interval;
            let target = self.spawn_target();
            while self.customers.len() < target {
                if self.spawn_customer().is_err() {
                    break;
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Phase 3: Kitchen
    // -----------------------------------------------------------------------

    fn phase_kitchen(&mut self, dt: Seconds) {
        let no_burn = self.cheats.is_active(CheatKind::NoBurn);
        let mut transitions = Vec::new();
        for oven in self.ovens.values() {
            if let Some(change) = oven.advance(dt, no_burn, &mut self.pizzas) {
                transitions.push(change);
            }
        }
        for (pizza, transition) in transitions {
            self.announce_cook(pizza, transition);
        }

        if let Some(output) = self.blender.tick(dt) {
            log::debug!("blender finished: {output}");
            self.emit(Event::BlendFinished {
                output,
                step: self.sim_state.step,
            });
        }
    }

    // -----------------------------------------------------------------------
    // Phase 4: Customers
    // -----------------------------------------------------------------------

    fn phase_customers(&mut self, dt: Seconds) {
        let ids: Vec<CustomerId> = self.customers.keys().collect();
        let mut departed = Vec::new();

        for id in ids {
            let Some(customer) = self.customers.get_mut(id) else {
                continue;
            };
            let Some(update) = customer.tick(dt, &mut self.seats, &self.config) else {
                continue;
            };
            match update {
                CustomerTick::ReachedSeat => self.seat_customer(id),
                CustomerTick::PatienceExpired => {
                    self.emit(Event::PatienceExpired {
                        customer: id,
                        step: self.sim_state.step,
                    });
                    self.on_resolution(id, Resolution::Abandoned);
                }
                CustomerTick::FinishedCelebrating => {}
                CustomerTick::ReachedExit => departed.push(id),
            }
        }

        for id in departed {
            let succeeded = self
                .customers
                .get(id)
                .and_then(Customer::resolution)
                .is_some_and(Resolution::succeeded);
            self.emit(Event::CustomerDeparted {
                customer: id,
                succeeded,
                step: self.sim_state.step,
            });
            // Failures are logged by resolve_customer.
            let _ = self.resolve_customer(id, succeeded);
        }
    }

    fn seat_customer(&mut self, id: CustomerId) {
        let order = Order::generate(
            &self.config.required_ingredients,
            &self.config.optional_ingredients,
            self.config.order_sampling,
            &mut self.rng,
        );
        let budget = self.patience_budget;
        let Some(customer) = self.customers.get_mut(id) else {
            return;
        };
        match customer.arrive(&mut self.seats, budget, order) {
            Ok(()) => self.emit(Event::CustomerSeated {
                customer: id,
                step: self.sim_state.step,
            }),
            Err(err) => log::warn!("customer {id:?} could not sit down: {err}"),
        }
    }

    // -----------------------------------------------------------------------
    // Phase 5: Progression
    // -----------------------------------------------------------------------

    fn phase_progression(&mut self, dt: Seconds) {
        for advance in self.progression.tick(dt) {
            self.announce_day(advance);
        }
    }

    // -----------------------------------------------------------------------
    // Phase 6: Post-tick -- event delivery
    // -----------------------------------------------------------------------

    fn phase_post_tick(&mut self) {
        self.event_bus.deliver();
        let reactive = self.event_bus.drain_commands();
        self.commands.push_batch(reactive);
    }

    // -----------------------------------------------------------------------
    // Phase 7: Bookkeeping
    // -----------------------------------------------------------------------

    fn phase_bookkeeping(&mut self, dt: Seconds) {
        self.sim_state.step += 1;
        self.sim_state.elapsed = self.sim_state.elapsed.saturating_add(dt);
        self.last_state_hash = self.compute_state_hash();
    }

    /// The hash computed at the end of the last step.
    pub fn state_hash(&self) -> u64 {
        self.last_state_hash
    }

    fn compute_state_hash(&self) -> u64 {
        let mut hasher = StateHash::new();
        hasher.write_u64(self.sim_state.step);
        hasher.write_fixed64(self.sim_state.elapsed);
        hasher.write_u64(self.rng.state());
        hasher.write_u32(self.progression.day());
        hasher.write_u32(self.progression.level());
        hasher.write_u32(self.progression.served());
        hasher.write_u32(self.progression.failed());
        hasher.write_u32(self.health.current());
        hasher.write_fixed64(self.patience_budget);

        for customer in self.customers.values() {
            hasher.write_u32(customer.state() as u32);
            hasher.write_fixed64(customer.patience().remaining());
            hasher.write(customer.name().as_bytes());
        }
        for pizza in self.pizzas.values() {
            hasher.write_fixed64(pizza.timer().elapsed());
            for kind in pizza.ingredients() {
                hasher.write_u32(*kind as u32);
            }
        }
        hasher.write_u32(self.blender.ready());
        hasher.finish()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn customers(&self) -> impl Iterator<Item = (CustomerId, &Customer)> {
        self.customers.iter()
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn pizza(&self, id: PizzaId) -> Option<&Pizza> {
        self.pizzas.get(id)
    }

    pub fn oven_ids(&self) -> Vec<OvenId> {
        self.ovens.keys().collect()
    }

    pub fn oven(&self, id: OvenId) -> Option<&Oven> {
        self.ovens.get(id)
    }

    pub fn oven_display(&self, id: OvenId) -> Result<OvenDisplay, RestaurantError> {
        self.ovens
            .get(id)
            .map(|oven| oven.display(&self.pizzas))
            .ok_or(RestaurantError::UnknownOven(id))
    }

    pub fn blender(&self) -> &Blender {
        &self.blender
    }

    pub fn seats(&self) -> &SeatPool {
        &self.seats
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn day(&self) -> u32 {
        self.progression.day()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn health(&self) -> &PlayerHealth {
        &self.health
    }

    pub fn patience_budget(&self) -> Seconds {
        self.patience_budget
    }
}

/// Log a refused player action and pass the error on.
fn refused(err: RestaurantError) -> RestaurantError {
    log::warn!("{err}");
    err
}

// ===========================================================================
// Tests
// ===========================================================================
