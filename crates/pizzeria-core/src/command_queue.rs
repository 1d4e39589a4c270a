//! Input command queue for deferred restaurant mutations.
//!
//! Commands are queued by the host (debug panel, scripting) or produced by
//! reactive event handlers, and applied at the start of the next step so
//! that a step never observes half-applied input.

use crate::cheats::CheatKind;
use crate::id::CustomerId;

// ---------------------------------------------------------------------------
// Command enum
// ---------------------------------------------------------------------------

/// A single deferred operation on the restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Spawn one customer now. A seat shortage is logged and dropped.
    SpawnCustomer,
    /// Settle a customer's order and remove them.
    ResolveCustomer {
        customer: CustomerId,
        succeeded: bool,
    },
    /// Jump to the next day.
    AdvanceDay,
    /// Toggle a cheat.
    SetCheat { kind: CheatKind, enabled: bool },
}

// ---------------------------------------------------------------------------
// CommandQueue
// ---------------------------------------------------------------------------

/// Commands waiting for the next step boundary.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    pub fn push_batch(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.pending.extend(commands);
    }

    /// Take every pending command in submission order.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order() {
        let mut queue = CommandQueue::new();
        queue.push(Command::SpawnCustomer);
        queue.push_batch([Command::AdvanceDay, Command::SpawnCustomer]);
        assert_eq!(queue.pending_count(), 3);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                Command::SpawnCustomer,
                Command::AdvanceDay,
                Command::SpawnCustomer
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut queue = CommandQueue::new();
        queue.push(Command::AdvanceDay);
        queue.push(Command::SpawnCustomer);
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
