//! The customer lifecycle state machine.
//!
//! ```text
//!   Approaching --arrive--> Seated --interact(match)--> Served --celebrate--+
//!                              |                                            |
//!                              +--interact(mismatch) / patience expiry--+   |
//!                                                                       v   v
//!                                                      Removed <--walk-- Leaving
//! ```
//!
//! A customer owns no shared state. Seats live in the [`SeatPool`]; the
//! restaurant hands it in whenever a transition needs to claim or release.
//! Every wait (walking, celebrating, turning) is a countdown field advanced
//! by [`Customer::tick`].

use serde::{Deserialize, Serialize};

use crate::config::RestaurantConfig;
use crate::error::RestaurantError;
use crate::fixed::{Fixed64, Seconds, countdown};
use crate::id::{CustomerId, Location, SeatId};
use crate::ingredient::{IngredientKind, ToolKind};
use crate::order::{MatchPolicy, Order};
use crate::patience::PatienceTimer;
use crate::pizza::Pizza;
use crate::seat::SeatPool;

// ---------------------------------------------------------------------------
// States and outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerState {
    /// Walking from the entry to the reserved seat.
    Approaching,
    /// Sitting with an order and a running patience timer.
    Seated,
    /// Got a matching pizza; celebrating before leaving.
    Served,
    /// Turning away and walking to the exit.
    Leaving,
    /// Reached the exit. The restaurant drops the customer next.
    Removed,
}

/// How a customer's visit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Handed a pizza that matched the order.
    Served,
    /// Handed a pizza that did not match.
    Rejected,
    /// Ran out of patience before being served.
    Abandoned,
}

impl Resolution {
    pub fn succeeded(self) -> bool {
        matches!(self, Resolution::Served)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum DeparturePhase {
    Turning,
    Walking,
}

/// What the player is holding out to a customer.
#[derive(Debug, Clone, Copy)]
pub enum Offering<'a> {
    Pizza(&'a Pizza),
    Ingredient(IngredientKind),
    Tool(ToolKind),
}

/// Something that happened to a customer during [`Customer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerTick {
    /// The walk to the seat is over; the restaurant should call `arrive`.
    ReachedSeat,
    /// Patience hit zero. The visit is `Abandoned` and the seat is free.
    PatienceExpired,
    /// The celebration ended and the customer started leaving.
    FinishedCelebrating,
    /// The customer walked out and is now `Removed`.
    ReachedExit,
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    state: CustomerState,
    seat: SeatId,
    seat_location: Location,
    exit: Location,
    patience: PatienceTimer,
    order: Option<Order>,
    resolution: Option<Resolution>,
    /// Time left in the current walk, celebration or turn.
    wait: Seconds,
    departure: Option<DeparturePhase>,
}

impl Customer {
    /// A customer walking from the entry towards `seat`, which the
    /// restaurant has already reserved for them.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        seat: SeatId,
        seat_location: Location,
        config: &RestaurantConfig,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            state: CustomerState::Approaching,
            seat,
            seat_location,
            exit: config.exit,
            patience: PatienceTimer::new(),
            order: None,
            resolution: None,
            wait: config.approach_duration,
            departure: None,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CustomerState {
        self.state
    }

    pub fn seat(&self) -> SeatId {
        self.seat
    }

    pub fn seat_location(&self) -> Location {
        self.seat_location
    }

    pub fn exit(&self) -> Location {
        self.exit
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn patience(&self) -> &PatienceTimer {
        &self.patience
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Seated and still waiting for food.
    pub fn is_waiting(&self) -> bool {
        self.state == CustomerState::Seated
    }

    /// Remaining patience as a fraction of the budget.
    pub fn patience_fraction(&self) -> Fixed64 {
        self.patience.fraction()
    }

    /// Index into `faces` mood sprites; see [`PatienceTimer::mood_index`].
    pub fn mood_index(&self, faces: usize) -> usize {
        self.patience.mood_index(faces)
    }

    /// Sit down, place `order` and start waiting with `patience` seconds.
    ///
    /// Only valid while approaching. Fails with `SeatUnavailable` if the
    /// seat is held by another customer.
    pub fn arrive(
        &mut self,
        seats: &mut SeatPool,
        patience: Seconds,
        order: Order,
    ) -> Result<(), RestaurantError> {
        if self.state != CustomerState::Approaching {
            return Err(RestaurantError::InvariantViolation(format!(
                "{} cannot sit down while {:?}",
                self.name, self.state
            )));
        }
        seats
            .get_mut(self.seat)
            .ok_or(RestaurantError::SeatUnavailable)?
            .claim(self.id)?;

        log::debug!("{} sat down and ordered {}", self.name, order.describe());
        self.state = CustomerState::Seated;
        self.patience.start(patience);
        self.order = Some(order);
        self.wait = Seconds::ZERO;
        Ok(())
    }

    /// Advance every countdown that applies to the current state.
    ///
    /// Each call moves through at most one phase; time left over at a phase
    /// boundary is not carried into the next phase.
    pub fn tick(
        &mut self,
        dt: Seconds,
        seats: &mut SeatPool,
        config: &RestaurantConfig,
    ) -> Option<CustomerTick> {
        if dt <= Seconds::ZERO {
            return None;
        }
        match self.state {
            CustomerState::Approaching => {
                if self.wait == Seconds::ZERO {
                    // Still waiting for `arrive`.
                    return Some(CustomerTick::ReachedSeat);
                }
                self.wait = countdown(self.wait, dt);
                (self.wait == Seconds::ZERO).then_some(CustomerTick::ReachedSeat)
            }
            CustomerState::Seated => {
                if !self.patience.tick(dt) {
                    return None;
                }
                log::debug!("{} ran out of patience", self.name);
                self.resolution = Some(Resolution::Abandoned);
                self.begin_leaving(seats, config);
                Some(CustomerTick::PatienceExpired)
            }
            CustomerState::Served => {
                self.wait = countdown(self.wait, dt);
                if self.wait > Seconds::ZERO {
                    return None;
                }
                self.begin_leaving(seats, config);
                Some(CustomerTick::FinishedCelebrating)
            }
            CustomerState::Leaving => {
                self.wait = countdown(self.wait, dt);
                if self.wait > Seconds::ZERO {
                    return None;
                }
                match self.departure {
                    Some(DeparturePhase::Turning) => {
                        self.departure = Some(DeparturePhase::Walking);
                        self.wait = config.exit_walk_duration;
                        None
                    }
                    _ => {
                        self.departure = None;
                        self.state = CustomerState::Removed;
                        Some(CustomerTick::ReachedExit)
                    }
                }
            }
            CustomerState::Removed => None,
        }
    }

    /// Hand the customer something.
    ///
    /// Returns `Ok(None)` when the customer is not seated (nothing happens).
    /// A pizza always settles the order: `Served` when it matches (or
    /// `god_mode` is on), `Rejected` otherwise. Either way the seat is freed
    /// and patience stops.
    pub fn interact(
        &mut self,
        offering: Offering<'_>,
        policy: MatchPolicy,
        god_mode: bool,
        seats: &mut SeatPool,
        config: &RestaurantConfig,
    ) -> Result<Option<Resolution>, RestaurantError> {
        if self.state != CustomerState::Seated {
            return Ok(None);
        }
        let pizza = match offering {
            Offering::Pizza(pizza) => pizza,
            Offering::Ingredient(kind) => {
                return Err(RestaurantError::invalid(format!(
                    "{} wants a pizza, not {kind}!",
                    self.name
                )));
            }
            Offering::Tool(tool) => {
                return Err(RestaurantError::invalid(format!(
                    "{} can't eat a {tool}!",
                    self.name
                )));
            }
        };

        let accepted = god_mode
            || self
                .order
                .as_ref()
                .is_some_and(|order| order.matches(pizza, policy));

        self.patience.stop();
        seats.release_held_by(self.id);

        let resolution = if accepted {
            self.state = CustomerState::Served;
            self.wait = config.celebrate_duration;
            Resolution::Served
        } else {
            self.begin_leaving(seats, config);
            Resolution::Rejected
        };
        self.resolution = Some(resolution);
        log::debug!("{} resolved as {resolution:?}", self.name);
        Ok(Some(resolution))
    }

    /// Start leaving. Returns `false` if already leaving or gone.
    pub fn leave(&mut self, seats: &mut SeatPool, config: &RestaurantConfig) -> bool {
        if matches!(self.state, CustomerState::Leaving | CustomerState::Removed) {
            return false;
        }
        self.begin_leaving(seats, config);
        true
    }

    fn begin_leaving(&mut self, seats: &mut SeatPool, config: &RestaurantConfig) {
        self.patience.stop();
        seats.release_held_by(self.id);
        self.state = CustomerState::Leaving;
        self.departure = Some(DeparturePhase::Turning);
        self.wait = config.turn_duration;
        if self.wait == Seconds::ZERO {
            self.departure = Some(DeparturePhase::Walking);
            self.wait = config.exit_walk_duration;
        }
    }
}
