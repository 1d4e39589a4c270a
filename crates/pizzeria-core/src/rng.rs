//! Deterministic PRNG for order generation, seat picks and customer names.
//!
//! SplitMix64. The whole generator is one `u64`, which goes into snapshots
//! and the state hash as is.

/// Seeded generator. The same seed gives the same shift on every platform.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    ///
    /// Uses Lemire's multiply-shift reduction; the bias for the small
    /// bounds used here (menus, seats, name lists) is negligible.
    pub fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let r = self.next_u64();
        ((r as u128 * bound as u128) >> 64) as usize
    }

    /// Uniform integer in `[0, max]`, both ends inclusive.
    pub fn up_to(&mut self, max: usize) -> usize {
        self.below(max.saturating_add(1))
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    /// Pick a uniform element of `items`, or `None` if empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.below(items.len()))
        }
    }

    /// Get the internal state (for hashing/serialization).
    pub fn state(&self) -> u64 {
        self.state
    }
}
