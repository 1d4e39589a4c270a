//! Tick strategy and simulation bookkeeping types.
//!
//! The restaurant is parameterized by a [`TickStrategy`] that determines how
//! frame time becomes simulation steps. Both strategies run the same step
//! pipeline; they differ only in how many steps run per `tick()` call and
//! how long each step is.

use crate::fixed::{Fixed64, Seconds, Steps};

// ---------------------------------------------------------------------------
// Tick strategy
// ---------------------------------------------------------------------------

/// How the restaurant turns frame time into steps. Chosen in the config.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TickStrategy {
    /// One step per `tick(dt)` call, lasting exactly `dt`. Mirrors a
    /// per-frame update loop.
    Variable,

    /// Accumulate frame time and run as many steps of `timestep` as fit,
    /// carrying the remainder forward. Frame-rate independent.
    Fixed {
        /// Length of one step. Non-positive values are treated as one tick
        /// of the smallest representable duration.
        timestep: Seconds,
    },
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Mutable bookkeeping tracked by the restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimState {
    /// Steps run since the shift began.
    pub step: Steps,

    /// Simulated seconds since the shift began.
    pub elapsed: Seconds,

    /// Frame time not yet consumed by a fixed step. Unused in variable mode.
    pub accumulator: Seconds,
}

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Tick result
// ---------------------------------------------------------------------------

/// Result of a `Restaurant::tick()` call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickResult {
    /// Number of simulation steps actually executed.
    pub steps_run: u64,

    /// Number of queued commands applied at the start of those steps.
    pub commands_applied: usize,
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// A simple deterministic hash of simulation state for replay checks.
///
/// 64-bit FNV-1a. Only for comparing runs, never for security.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHash(pub u64);

impl StateHash {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    /// Feed bytes into the hash.
    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::FNV_PRIME);
        }
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write(&v.to_le_bytes());
    }

    pub fn write_fixed64(&mut self, v: Fixed64) {
        self.write(&v.to_bits().to_le_bytes());
    }

    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for StateHash {
    fn default() -> Self {
        Self::new()
    }
}
