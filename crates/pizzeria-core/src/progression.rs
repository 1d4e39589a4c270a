//! Days, levels and the running tally of served and failed orders.
//!
//! The day counter starts at 1 and advances every `day_duration` of ticked
//! time (or on demand). The level is derived from the day:
//!
//! ```text
//!   level = min(ceil(day / days_per_level), max_level)
//! ```
//!
//! so it never decreases while the day only grows. Only
//! [`Progression::reset`] takes either back to 1.

use serde::{Deserialize, Serialize};

use crate::config::RestaurantConfig;
use crate::fixed::{Fixed64, Seconds};

/// A level change caused by a new day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub old: u32,
    pub new: u32,
}

/// The result of moving to the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAdvance {
    pub day: u32,
    pub level_change: Option<LevelChange>,
}

/// Level for a given day. Day 0 counts as day 1.
pub fn level_for_day(day: u32, days_per_level: u32, max_level: u32) -> u32 {
    let days_per_level = days_per_level.max(1);
    day.max(1).div_ceil(days_per_level).clamp(1, max_level.max(1))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    day: u32,
    level: u32,
    served: u32,
    failed: u32,
    day_timer: Seconds,
    day_duration: Seconds,
    days_per_level: u32,
    max_level: u32,
}

impl Progression {
    pub fn new(config: &RestaurantConfig) -> Self {
        Self {
            day: 1,
            level: 1,
            served: 0,
            failed: 0,
            day_timer: Seconds::ZERO,
            day_duration: config.day_duration,
            days_per_level: config.days_per_level,
            max_level: config.max_level,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Customers who left happy.
    pub fn served(&self) -> u32 {
        self.served
    }

    /// Customers who were rejected or gave up.
    pub fn failed(&self) -> u32 {
        self.failed
    }

    /// Every resolved customer.
    pub fn total(&self) -> u32 {
        self.served + self.failed
    }

    pub fn record(&mut self, succeeded: bool) {
        if succeeded {
            self.served += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Move to the next day now. The day clock restarts from zero.
    pub fn advance_day(&mut self) -> DayAdvance {
        self.day_timer = Seconds::ZERO;
        self.next_day()
    }

    /// Run the day clock. Returns one [`DayAdvance`] per day boundary
    /// crossed; leftover time carries into the new day.
    pub fn tick(&mut self, dt: Seconds) -> Vec<DayAdvance> {
        let mut advances = Vec::new();
        if dt <= Seconds::ZERO || self.day_duration <= Seconds::ZERO {
            return advances;
        }
        self.day_timer = self.day_timer.saturating_add(dt);
        while self.day_timer >= self.day_duration {
            self.day_timer -= self.day_duration;
            advances.push(self.next_day());
        }
        advances
    }

    fn next_day(&mut self) -> DayAdvance {
        self.day = self.day.saturating_add(1);
        let new = level_for_day(self.day, self.days_per_level, self.max_level).max(self.level);
        let level_change = (new != self.level).then(|| {
            let change = LevelChange {
                old: self.level,
                new,
            };
            self.level = new;
            log::info!("level increased from {} to {new}", change.old);
            change
        });
        log::info!("day {} started (level {})", self.day, self.level);
        DayAdvance {
            day: self.day,
            level_change,
        }
    }

    /// Fraction of the current day already elapsed, in `[0, 1)`.
    pub fn day_progress(&self) -> Fixed64 {
        if self.day_duration <= Seconds::ZERO {
            return Fixed64::ZERO;
        }
        (self.day_timer / self.day_duration).clamp(Fixed64::ZERO, Fixed64::ONE)
    }

    /// How much harder the current level is than level 1: +20% per level.
    pub fn difficulty_multiplier(&self) -> f64 {
        1.0 + 0.2 * f64::from(self.level.saturating_sub(1))
    }

    pub fn level_name(&self) -> &'static str {
        match self.level {
            1 => "Beginner",
            2 => "Easy",
            3 => "Normal",
            4 => "Hard",
            5 => "Expert",
            _ => "Unknown",
        }
    }

    /// Back to day 1, level 1, no tallies.
    pub fn reset(&mut self) {
        self.day = 1;
        self.level = 1;
        self.served = 0;
        self.failed = 0;
        self.day_timer = Seconds::ZERO;
    }
}
