//! Per-customer patience countdown.

use serde::{Deserialize, Serialize};

use crate::fixed::{Fixed64, Seconds, countdown};

/// Counts a customer's tolerance down to zero.
///
/// The timer reports expiry exactly once: on the tick where `remaining`
/// first reaches zero. After that (or after [`stop`](Self::stop)) ticks
/// do nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatienceTimer {
    total: Seconds,
    remaining: Seconds,
    running: bool,
    expired: bool,
}

impl PatienceTimer {
    /// A stopped timer with no budget. Call [`start`](Self::start) to arm it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer with a full budget of `total` seconds.
    pub fn start(&mut self, total: Seconds) {
        let total = total.max(Seconds::ZERO);
        self.total = total;
        self.remaining = total;
        self.running = true;
        self.expired = false;
    }

    /// Count down by `dt`. Returns `true` only on the tick that expires.
    pub fn tick(&mut self, dt: Seconds) -> bool {
        if !self.running || dt <= Seconds::ZERO {
            return false;
        }
        self.remaining = countdown(self.remaining, dt);
        if self.remaining == Seconds::ZERO {
            self.running = false;
            self.expired = true;
            return true;
        }
        false
    }

    /// Stop counting. Safe to call on a stopped or expired timer.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn remaining(&self) -> Seconds {
        self.remaining
    }

    pub fn total(&self) -> Seconds {
        self.total
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Remaining patience as a fraction of the budget, in `[0, 1]`.
    pub fn fraction(&self) -> Fixed64 {
        if self.total <= Seconds::ZERO {
            return Fixed64::ZERO;
        }
        (self.remaining / self.total).clamp(Fixed64::ZERO, Fixed64::ONE)
    }

    /// Index into a row of `faces` mood sprites, happiest last.
    ///
    /// `floor(fraction * faces)` clamped to `[0, faces - 1]`; 0 when there
    /// are no faces.
    pub fn mood_index(&self, faces: usize) -> usize {
        if faces == 0 {
            return 0;
        }
        let scaled: i64 = (self.fraction() * Fixed64::from_num(faces as u32))
            .floor()
            .to_num();
        (scaled.max(0) as usize).min(faces - 1)
    }
}
