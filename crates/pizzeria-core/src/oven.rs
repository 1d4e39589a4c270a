//! Ovens: the only place a pizza's cook time advances.

use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::error::RestaurantError;
use crate::fixed::{Seconds, format_countdown};
use crate::id::PizzaId;
use crate::pizza::{CookState, CookTransition, Pizza};

/// What the oven's timer panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvenDisplay {
    /// Nothing inside.
    Idle,
    /// Raw pizza inside; time left until it is cooked.
    Countdown(Seconds),
    Ready,
    Burnt,
}

impl fmt::Display for OvenDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OvenDisplay::Idle => f.write_str("00:00"),
            OvenDisplay::Countdown(remaining) => f.write_str(&format_countdown(*remaining)),
            OvenDisplay::Ready => f.write_str("READY!"),
            OvenDisplay::Burnt => f.write_str("BURNT!"),
        }
    }
}

/// An oven slot holding at most one pizza.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Oven {
    pizza: Option<PizzaId>,
}

impl Oven {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pizza(&self) -> Option<PizzaId> {
        self.pizza
    }

    pub fn is_empty(&self) -> bool {
        self.pizza.is_none()
    }

    /// Put a pizza in. Fails if something is already inside.
    pub fn place(&mut self, pizza: PizzaId) -> Result<(), RestaurantError> {
        if self.pizza.is_some() {
            return Err(RestaurantError::invalid("There's an item in the oven already!"));
        }
        self.pizza = Some(pizza);
        Ok(())
    }

    /// Take the pizza out, if any.
    pub fn take(&mut self) -> Option<PizzaId> {
        self.pizza.take()
    }

    /// Heat the pizza inside for `dt`. `no_burn` holds it at cooked for this
    /// step.
    pub fn advance(
        &self,
        dt: Seconds,
        no_burn: bool,
        pizzas: &mut SlotMap<PizzaId, Pizza>,
    ) -> Option<(PizzaId, CookTransition)> {
        let id = self.pizza?;
        let pizza = pizzas.get_mut(id)?;
        pizza
            .timer_mut()
            .advance_guarded(dt, no_burn)
            .map(|transition| (id, transition))
    }

    pub fn display(&self, pizzas: &SlotMap<PizzaId, Pizza>) -> OvenDisplay {
        let Some(pizza) = self.pizza.and_then(|id| pizzas.get(id)) else {
            return OvenDisplay::Idle;
        };
        match pizza.cook_state() {
            CookState::Raw => OvenDisplay::Countdown(pizza.timer().remaining_to_cooked()),
            CookState::Cooked => OvenDisplay::Ready,
            CookState::Burnt => OvenDisplay::Burnt,
        }
    }
}
