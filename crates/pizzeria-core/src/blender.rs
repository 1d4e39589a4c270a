//! The blender turns tomatoes into sauce.

use serde::{Deserialize, Serialize};

use crate::error::RestaurantError;
use crate::fixed::{Seconds, countdown};
use crate::ingredient::{HeldItem, IngredientKind};

/// Blender state. Finished sauce waits in `ready` until the player takes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blender {
    /// Time left on the current batch, if blending.
    remaining: Option<Seconds>,
    ready: u32,
}

impl Blender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_blending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Sauce portions waiting to be picked up.
    pub fn ready(&self) -> u32 {
        self.ready
    }

    /// Start blending `item` for `duration`. Only tomatoes are accepted, and
    /// only while idle.
    pub fn start(&mut self, item: HeldItem, duration: Seconds) -> Result<(), RestaurantError> {
        if self.is_blending() {
            return Err(RestaurantError::invalid("The blender is busy!"));
        }
        if item != HeldItem::Ingredient(IngredientKind::Tomato) {
            return Err(RestaurantError::invalid("You can only blend tomatoes!"));
        }
        self.remaining = Some(duration.max(Seconds::ZERO));
        log::debug!("blender started");
        Ok(())
    }

    /// Run the motor for `dt`. Returns the output on the step it finishes.
    pub fn tick(&mut self, dt: Seconds) -> Option<IngredientKind> {
        let remaining = countdown(self.remaining?, dt);
        if remaining > Seconds::ZERO {
            self.remaining = Some(remaining);
            return None;
        }
        self.remaining = None;
        self.ready += 1;
        Some(IngredientKind::Sauce)
    }

    /// Pick up one portion of sauce.
    pub fn take(&mut self) -> Option<IngredientKind> {
        if self.ready == 0 {
            return None;
        }
        self.ready -= 1;
        Some(IngredientKind::Sauce)
    }
}
