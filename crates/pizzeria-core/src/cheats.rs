//! Debug cheats, toggled at runtime by the host's cheat panel.

use serde::{Deserialize, Serialize};

/// The cheats the kitchen understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheatKind {
    /// Customers accept whatever pizza they are handed.
    GodMode,
    /// Pizzas are cooked the moment they enter an oven.
    InstantCook,
    /// Pizzas never pass from cooked to burnt.
    NoBurn,
}

/// Which cheats are currently active. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cheats {
    god_mode: bool,
    instant_cook: bool,
    no_burn: bool,
}

impl Cheats {
    pub fn set(&mut self, kind: CheatKind, enabled: bool) {
        match kind {
            CheatKind::GodMode => self.god_mode = enabled,
            CheatKind::InstantCook => self.instant_cook = enabled,
            CheatKind::NoBurn => self.no_burn = enabled,
        }
        log::info!(
            "cheat {kind:?} is now {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    pub fn is_active(&self, kind: CheatKind) -> bool {
        match kind {
            CheatKind::GodMode => self.god_mode,
            CheatKind::InstantCook => self.instant_cook,
            CheatKind::NoBurn => self.no_burn,
        }
    }
}
