//! Snapshot support for the restaurant.
//!
//! Binary serialization via `bitcode` with a versioned header, plus a
//! snapshot ring buffer for rewind. Day and level are part of the snapshot,
//! so a restored shift resumes where it left off.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::collections::VecDeque;

use crate::blender::Blender;
use crate::cheats::Cheats;
use crate::command_queue::CommandQueue;
use crate::config::RestaurantConfig;
use crate::customer::Customer;
use crate::engine::Restaurant;
use crate::event::EventBus;
use crate::fixed::{Seconds, Steps};
use crate::health::PlayerHealth;
use crate::id::{CustomerId, OvenId, PizzaId};
use crate::oven::Oven;
use crate::pizza::Pizza;
use crate::progression::Progression;
use crate::rng::SimRng;
use crate::seat::SeatPool;
use crate::sim::SimState;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic number identifying a restaurant snapshot.
pub const SNAPSHOT_MAGIC: u32 = 0x9122_0001;

/// Current format version. Increment when breaking the wire format.
pub const FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", SNAPSHOT_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
    #[error("snapshot from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Snapshot header
// ---------------------------------------------------------------------------

/// Header stored with every snapshot, checked before the payload is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u32,
    /// Step count at the time the snapshot was taken.
    pub step: Steps,
}

impl SnapshotHeader {
    pub fn new(step: Steps) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
            step,
        }
    }

    pub fn validate(&self) -> Result<(), DeserializeError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(DeserializeError::InvalidMagic(self.magic));
        }
        if self.version > FORMAT_VERSION {
            return Err(DeserializeError::FutureVersion(self.version));
        }
        if self.version < FORMAT_VERSION {
            return Err(DeserializeError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

/// Decode a snapshot and return only its header.
pub fn read_snapshot_header(data: &[u8]) -> Result<SnapshotHeader, DeserializeError> {
    let snapshot: RestaurantSnapshot =
        bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
    Ok(snapshot.header)
}

// ---------------------------------------------------------------------------
// Serializable restaurant state
// ---------------------------------------------------------------------------

/// Everything but the event bus (closures) and the command queue.
#[derive(Debug, Serialize, Deserialize)]
struct RestaurantSnapshot {
    header: SnapshotHeader,
    config: RestaurantConfig,
    rng: SimRng,
    seats: SeatPool,
    customers: SlotMap<CustomerId, Customer>,
    pizzas: SlotMap<PizzaId, Pizza>,
    ovens: SlotMap<OvenId, Oven>,
    blender: Blender,
    progression: Progression,
    health: PlayerHealth,
    cheats: Cheats,
    patience_budget: Seconds,
    spawn_timer: Seconds,
    sim_state: SimState,
    paused: bool,
    game_over: bool,
    last_state_hash: u64,
}

// ---------------------------------------------------------------------------
// SnapshotRingBuffer
// ---------------------------------------------------------------------------

/// Recent snapshots for rewinding a shift, oldest first. Holds at most
/// `capacity` entries; taking one more evicts the oldest.
#[derive(Debug)]
pub struct SnapshotRingBuffer {
    entries: VecDeque<SnapshotEntry>,
    capacity: usize,
    total_taken: u64,
}

/// One encoded restaurant and the step it was taken at.
#[derive(Debug, Clone)]
pub struct SnapshotEntry {
    pub step: Steps,
    pub data: Vec<u8>,
}

impl SnapshotRingBuffer {
    /// `capacity` is at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            total_taken: 0,
        }
    }

    pub fn push(&mut self, entry: SnapshotEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.total_taken += 1;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshots taken over the buffer's lifetime, evicted ones included.
    pub fn total_taken(&self) -> u64 {
        self.total_taken
    }

    /// 0 is the oldest entry still held.
    pub fn get(&self, index: usize) -> Option<&SnapshotEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&SnapshotEntry> {
        self.entries.back()
    }

    /// The newest snapshot taken at or before `step`.
    pub fn at_or_before(&self, step: Steps) -> Option<&SnapshotEntry> {
        // Steps only grow, so entries are sorted by step.
        let after = self.entries.partition_point(|entry| entry.step <= step);
        after.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// Restaurant serialization methods
// ---------------------------------------------------------------------------

impl Restaurant {
    /// Serialize the restaurant to a binary blob.
    ///
    /// Event subscribers and queued commands are not included.
    pub fn serialize(&self) -> Result<Vec<u8>, SerializeError> {
        let snapshot = RestaurantSnapshot {
            header: SnapshotHeader::new(self.sim_state.step),
            config: self.config.clone(),
            rng: self.rng.clone(),
            seats: self.seats.clone(),
            customers: self.customers.clone(),
            pizzas: self.pizzas.clone(),
            ovens: self.ovens.clone(),
            blender: self.blender.clone(),
            progression: self.progression.clone(),
            health: self.health.clone(),
            cheats: self.cheats,
            patience_budget: self.patience_budget,
            spawn_timer: self.spawn_timer,
            sim_state: self.sim_state.clone(),
            paused: self.paused,
            game_over: self.game_over,
            last_state_hash: self.last_state_hash,
        };

        bitcode::serialize(&snapshot).map_err(|e| SerializeError::Encode(e.to_string()))
    }

    /// Rebuild a restaurant from [`serialize`](Self::serialize) output.
    ///
    /// The event bus comes back empty; subscribers must be re-registered.
    /// Slotmap rebuilds its free lists on load, so keys for customers and
    /// pizzas created after a restore can differ from an uninterrupted run
    /// once anything has been removed.
    pub fn deserialize(data: &[u8]) -> Result<Self, DeserializeError> {
        let snapshot: RestaurantSnapshot =
            bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
        snapshot.header.validate()?;

        Ok(Restaurant {
            event_bus: EventBus::new(snapshot.config.event_buffer_capacity),
            commands: CommandQueue::new(),
            config: snapshot.config,
            rng: snapshot.rng,
            seats: snapshot.seats,
            customers: snapshot.customers,
            pizzas: snapshot.pizzas,
            ovens: snapshot.ovens,
            blender: snapshot.blender,
            progression: snapshot.progression,
            health: snapshot.health,
            cheats: snapshot.cheats,
            patience_budget: snapshot.patience_budget,
            spawn_timer: snapshot.spawn_timer,
            sim_state: snapshot.sim_state,
            paused: snapshot.paused,
            game_over: snapshot.game_over,
            last_state_hash: snapshot.last_state_hash,
        })
    }

    pub fn take_snapshot(&self, buffer: &mut SnapshotRingBuffer) -> Result<(), SerializeError> {
        let data = self.serialize()?;
        buffer.push(SnapshotEntry {
            step: self.sim_state.step,
            data,
        });
        Ok(())
    }

    /// Restore from the ring buffer. `index` counts from the oldest (0).
    pub fn restore_snapshot(
        buffer: &SnapshotRingBuffer,
        index: usize,
    ) -> Result<Option<Restaurant>, DeserializeError> {
        let Some(entry) = buffer.get(index) else {
            return Ok(None);
        };
        Restaurant::deserialize(&entry.data).map(Some)
    }

    /// Rewind to the newest snapshot taken at or before `step`.
    pub fn rewind_to(
        buffer: &SnapshotRingBuffer,
        step: Steps,
    ) -> Result<Option<Restaurant>, DeserializeError> {
        let Some(entry) = buffer.at_or_before(step) else {
            return Ok(None);
        };
        Restaurant::deserialize(&entry.data).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::secs;

    fn busy_restaurant() -> Restaurant {
        let mut r = Restaurant::new(RestaurantConfig::default()).unwrap();
        for _ in 0..10 {
            r.tick(secs(1));
        }
        r
    }

    #[test]
    fn round_trip_preserves_state() {
        let r = busy_restaurant();
        let data = r.serialize().unwrap();
        let restored = Restaurant::deserialize(&data).unwrap();

        assert_eq!(restored.sim_state, r.sim_state);
        assert_eq!(restored.state_hash(), r.state_hash());
        assert_eq!(restored.customer_count(), r.customer_count());
        assert_eq!(restored.day(), r.day());
        assert_eq!(read_snapshot_header(&data).unwrap().step, 10);
    }

    #[test]
    fn restored_restaurant_replays_identically() {
        let mut a = busy_restaurant();
        let mut b = Restaurant::deserialize(&a.serialize().unwrap()).unwrap();
        for _ in 0..30 {
            a.tick(secs(1));
            b.tick(secs(1));
            assert_eq!(a.state_hash(), b.state_hash());
        }
    }

    #[test]
    fn header_validation() {
        assert!(SnapshotHeader::new(0).validate().is_ok());

        let bad_magic = SnapshotHeader {
            magic: 0xDEAD_BEEF,
            ..SnapshotHeader::new(0)
        };
        assert!(matches!(
            bad_magic.validate(),
            Err(DeserializeError::InvalidMagic(0xDEAD_BEEF))
        ));

        let future = SnapshotHeader {
            version: FORMAT_VERSION + 1,
            ..SnapshotHeader::new(0)
        };
        assert!(matches!(
            future.validate(),
            Err(DeserializeError::FutureVersion(_))
        ));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            Restaurant::deserialize(&[1, 2, 3]),
            Err(DeserializeError::Decode(_))
        ));
    }

    #[test]
    fn ring_buffer_keeps_latest() {
        let mut r = Restaurant::new(RestaurantConfig::default()).unwrap();
        let mut buffer = SnapshotRingBuffer::new(3);
        assert!(buffer.latest().is_none());
        for _ in 0..5 {
            r.tick(secs(1));
            r.take_snapshot(&mut buffer).unwrap();
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.total_taken(), 5);
        assert_eq!(buffer.get(0).unwrap().step, 3);
        assert_eq!(buffer.latest().unwrap().step, 5);

        let oldest = Restaurant::restore_snapshot(&buffer, 0).unwrap().unwrap();
        assert_eq!(oldest.sim_state.step, 3);
        assert!(Restaurant::restore_snapshot(&buffer, 3).unwrap().is_none());
    }

    #[test]
    fn rewind_finds_newest_snapshot_not_after_step() {
        let mut r = Restaurant::new(RestaurantConfig::default()).unwrap();
        let mut buffer = SnapshotRingBuffer::new(8);
        for _ in 0..4 {
            r.tick(secs(2));
            r.tick(secs(2));
            r.take_snapshot(&mut buffer).unwrap();
        }
        // Snapshots at steps 2, 4, 6 and 8.
        assert_eq!(buffer.at_or_before(5).unwrap().step, 4);
        assert_eq!(buffer.at_or_before(8).unwrap().step, 8);
        assert_eq!(buffer.at_or_before(100).unwrap().step, 8);
        assert!(buffer.at_or_before(1).is_none());

        let rewound = Restaurant::rewind_to(&buffer, 7).unwrap().unwrap();
        assert_eq!(rewound.sim_state.step, 6);
        assert!(Restaurant::rewind_to(&buffer, 0).unwrap().is_none());
    }
}
