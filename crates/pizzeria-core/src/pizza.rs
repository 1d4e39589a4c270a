//! Pizzas and their time-driven cook state.
//!
//! A pizza's cook state is a pure function of how long it has spent in a
//! heat source:
//!
//! ```text
//!   elapsed <  cook          -> Raw
//!   cook <= elapsed < burn   -> Cooked
//!   burn <= elapsed          -> Burnt
//! ```
//!
//! Elapsed time only ever grows, so the state only ever moves forward.
//! Cheats may push the time forward ([`CheatKind::InstantCook`]) or hold it
//! just short of the burn threshold ([`CheatKind::NoBurn`]); neither can
//! move a pizza back to an earlier state.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cheats::CheatKind;
use crate::error::RestaurantError;
use crate::fixed::{Fixed64, Seconds, countdown};
use crate::ingredient::IngredientKind;

// ---------------------------------------------------------------------------
// Cook state
// ---------------------------------------------------------------------------

/// How done a pizza is. Ordered: `Raw < Cooked < Burnt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CookState {
    #[default]
    Raw,
    Cooked,
    Burnt,
}

impl fmt::Display for CookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookState::Raw => f.write_str("raw"),
            CookState::Cooked => f.write_str("cooked"),
            CookState::Burnt => f.write_str("burnt"),
        }
    }
}

/// A change of cook state caused by `advance` or a cheat.
///
/// `to == Cooked` is the "ready" cue, `to == Burnt` the "burnt" cue. A
/// single large step can go straight from `Raw` to `Burnt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookTransition {
    pub from: CookState,
    pub to: CookState,
}

// ---------------------------------------------------------------------------
// Cook timer
// ---------------------------------------------------------------------------

/// Cumulative heat exposure of one pizza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookTimer {
    elapsed: Seconds,
    cook_duration: Seconds,
    burn_duration: Seconds,
    /// Set by [`CheatKind::NoBurn`]. Sticky for this pizza.
    no_burn: bool,
}

impl CookTimer {
    /// A fresh, raw timer. Callers guarantee `burn_duration > cook_duration`
    /// (enforced by config validation).
    pub fn new(cook_duration: Seconds, burn_duration: Seconds) -> Self {
        Self {
            elapsed: Seconds::ZERO,
            cook_duration,
            burn_duration,
            no_burn: false,
        }
    }

    pub fn elapsed(&self) -> Seconds {
        self.elapsed
    }

    pub fn cook_duration(&self) -> Seconds {
        self.cook_duration
    }

    pub fn burn_duration(&self) -> Seconds {
        self.burn_duration
    }

    /// The state derived from elapsed time.
    pub fn state(&self) -> CookState {
        if self.elapsed >= self.burn_duration {
            CookState::Burnt
        } else if self.elapsed >= self.cook_duration {
            CookState::Cooked
        } else {
            CookState::Raw
        }
    }

    /// Add heat exposure. Non-positive `dt` is ignored.
    pub fn advance(&mut self, dt: Seconds) -> Option<CookTransition> {
        self.advance_guarded(dt, false)
    }

    /// Like [`advance`](Self::advance), but with an extra no-burn guard that
    /// applies to this step only (the oven passes the global cheat here).
    pub fn advance_guarded(&mut self, dt: Seconds, no_burn: bool) -> Option<CookTransition> {
        if dt <= Seconds::ZERO {
            return None;
        }
        let from = self.state();
        self.elapsed = self.elapsed.saturating_add(dt);
        if (no_burn || self.no_burn) && from != CookState::Burnt {
            self.elapsed = self.elapsed.min(self.last_cooked_instant());
        }
        self.transition_from(from)
    }

    /// Apply a cheat to this pizza. Reapplying a cheat changes nothing.
    pub fn apply_cheat(&mut self, kind: CheatKind) -> Option<CookTransition> {
        let from = self.state();
        match kind {
            CheatKind::InstantCook => {
                if self.elapsed < self.cook_duration {
                    self.elapsed = self.cook_duration;
                }
            }
            CheatKind::NoBurn => {
                self.no_burn = true;
            }
            // Handled by customers, not pizzas.
            CheatKind::GodMode => {}
        }
        self.transition_from(from)
    }

    /// Time left until the pizza is cooked (zero once cooked).
    pub fn remaining_to_cooked(&self) -> Seconds {
        countdown(self.cook_duration, self.elapsed)
    }

    /// Time left until the pizza burns (zero once burnt).
    pub fn remaining_to_burnt(&self) -> Seconds {
        countdown(self.burn_duration, self.elapsed)
    }

    /// How far along the raw-to-burnt colour ramp the crust is, in `[0, 1]`.
    pub fn char_fraction(&self) -> Fixed64 {
        if self.burn_duration <= Seconds::ZERO {
            return Fixed64::ONE;
        }
        (self.elapsed / self.burn_duration).clamp(Fixed64::ZERO, Fixed64::ONE)
    }

    fn last_cooked_instant(&self) -> Seconds {
        self.burn_duration - Seconds::DELTA
    }

    fn transition_from(&self, from: CookState) -> Option<CookTransition> {
        let to = self.state();
        (to != from).then_some(CookTransition { from, to })
    }
}

// ---------------------------------------------------------------------------
// Pizza
// ---------------------------------------------------------------------------

/// A pizza: toppings plus its cook timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pizza {
    ingredients: BTreeSet<IngredientKind>,
    timer: CookTimer,
}

impl Pizza {
    /// Fresh raw dough with nothing on it.
    pub fn new(cook_duration: Seconds, burn_duration: Seconds) -> Self {
        Self {
            ingredients: BTreeSet::new(),
            timer: CookTimer::new(cook_duration, burn_duration),
        }
    }

    /// Put a topping on the pizza.
    ///
    /// Only raw pizzas accept toppings, only toppings are accepted, and each
    /// kind goes on at most once.
    pub fn add_ingredient(&mut self, kind: IngredientKind) -> Result<(), RestaurantError> {
        let state = self.cook_state();
        if state != CookState::Raw {
            return Err(RestaurantError::invalid(format!(
                "Pizza is {state}! Can't add!"
            )));
        }
        if !kind.is_topping() || self.ingredients.contains(&kind) {
            return Err(RestaurantError::invalid(format!(
                "You can't add {kind} to the pizza!"
            )));
        }
        self.ingredients.insert(kind);
        Ok(())
    }

    pub fn has(&self, kind: IngredientKind) -> bool {
        self.ingredients.contains(&kind)
    }

    pub fn ingredients(&self) -> &BTreeSet<IngredientKind> {
        &self.ingredients
    }

    pub fn cook_state(&self) -> CookState {
        self.timer.state()
    }

    pub fn timer(&self) -> &CookTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut CookTimer {
        &mut self.timer
    }
}

// ===========================================================================
// Tests
// ===========================================================================
