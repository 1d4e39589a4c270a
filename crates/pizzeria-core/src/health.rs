//! The player's health bar. Failed orders hurt; at zero the shift is over.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHealth {
    current: u32,
    max: u32,
}

impl PlayerHealth {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Subtract `amount`, saturating at zero. Returns the damage actually
    /// dealt.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current);
        self.current -= dealt;
        dealt
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }
}
