//! Typed restaurant events, buffered per kind until the end of the step.
//!
//! Events are emitted while a step runs and delivered in batch at the end of
//! the step. They are how the core asks the host for side effects (play the
//! celebrate animation, hurt the player, show "READY!") and how it reports
//! outcomes. Each event kind has its own bounded [`EventBuffer`].
//!
//! # Subscriber Types
//!
//! - **Passive listeners**: see each event, change nothing (HUD, sound, logs).
//! - **Reactive handlers**: return [`Command`]s to apply at the start of the
//!   next step.
//!
//! # Suppression
//!
//! Event kinds can be suppressed via [`EventBus::suppress`], which prevents
//! the kind from being buffered at all.

use crate::command_queue::Command;
use crate::customer::Resolution;
use crate::fixed::Steps;
use crate::id::{CustomerId, Location, PizzaId, SeatId};
use crate::ingredient::IngredientKind;
use crate::pizza::CookState;
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A restaurant event. All events carry the step at which they occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // -- Customers --
    /// A customer appeared at the entry and is walking to `seat`.
    CustomerSpawned {
        customer: CustomerId,
        seat: SeatId,
        location: Location,
        step: Steps,
    },
    /// A customer sat down and placed an order.
    CustomerSeated {
        customer: CustomerId,
        step: Steps,
    },
    /// A customer ran out of patience. Fires once per customer.
    PatienceExpired {
        customer: CustomerId,
        step: Steps,
    },
    /// A customer's order was settled (served, rejected or abandoned).
    OrderResolved {
        customer: CustomerId,
        resolution: Resolution,
        step: Steps,
    },
    /// A customer reached the exit and left the restaurant.
    CustomerDeparted {
        customer: CustomerId,
        succeeded: bool,
        step: Steps,
    },

    // -- Kitchen --
    CookStateChanged {
        pizza: PizzaId,
        from: CookState,
        to: CookState,
        step: Steps,
    },
    BlendFinished {
        output: IngredientKind,
        step: Steps,
    },

    // -- Progression --
    DayChanged {
        day: u32,
        step: Steps,
    },
    LevelChanged {
        old: u32,
        new: u32,
        step: Steps,
    },

    // -- Player --
    PlayerDamaged {
        amount: u32,
        remaining: u32,
        step: Steps,
    },
    GameOver {
        step: Steps,
    },
}

/// Discriminant tag for event types, used for suppression and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CustomerSpawned,
    CustomerSeated,
    PatienceExpired,
    OrderResolved,
    CustomerDeparted,
    CookStateChanged,
    BlendFinished,
    DayChanged,
    LevelChanged,
    PlayerDamaged,
    GameOver,
}

/// Total number of event kinds.
const EVENT_KIND_COUNT: usize = 11;

impl Event {
    /// Get the discriminant kind for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::CustomerSpawned { .. } => EventKind::CustomerSpawned,
            Event::CustomerSeated { .. } => EventKind::CustomerSeated,
            Event::PatienceExpired { .. } => EventKind::PatienceExpired,
            Event::OrderResolved { .. } => EventKind::OrderResolved,
            Event::CustomerDeparted { .. } => EventKind::CustomerDeparted,
            Event::CookStateChanged { .. } => EventKind::CookStateChanged,
            Event::BlendFinished { .. } => EventKind::BlendFinished,
            Event::DayChanged { .. } => EventKind::DayChanged,
            Event::LevelChanged { .. } => EventKind::LevelChanged,
            Event::PlayerDamaged { .. } => EventKind::PlayerDamaged,
            Event::GameOver { .. } => EventKind::GameOver,
        }
    }
}

impl EventKind {
    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// EventBuffer
// ---------------------------------------------------------------------------

/// Bounded queue of events of one kind. Once `capacity` events are waiting,
/// each new push evicts the oldest.
#[derive(Debug)]
pub struct EventBuffer {
    queue: VecDeque<Event>,
    capacity: usize,
    /// Pushes over the buffer's lifetime, evicted ones included.
    total_written: u64,
}

impl EventBuffer {
    /// `capacity` is at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            total_written: 0,
        }
    }

    pub fn push(&mut self, event: Event) {
        if self.queue.len() == self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(event);
        self.total_written += 1;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Event> {
        self.queue.iter()
    }

    /// Empty the buffer, handing back what was in it oldest first.
    pub fn take_all(&mut self) -> Vec<Event> {
        self.queue.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// A passive listener receives events read-only.
pub type PassiveListener = Box<dyn FnMut(&Event)>;

/// A reactive handler receives an event and returns zero or more commands
/// to apply at the start of the next step.
pub type ReactiveHandler = Box<dyn FnMut(&Event) -> Vec<Command>>;

enum Subscriber {
    Passive(PassiveListener),
    Reactive(ReactiveHandler),
}

impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subscriber::Passive(_) => write!(f, "Passive(<fn>)"),
            Subscriber::Reactive(_) => write!(f, "Reactive(<fn>)"),
        }
    }
}

/// Priority level for event subscribers. Lower priorities run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubscriberPriority {
    Pre = 0,
    Normal = 1,
    Post = 2,
}

/// Optional predicate that filters events for a subscriber.
pub type EventFilter = Box<dyn Fn(&Event) -> bool>;

struct SubscriberEntry {
    subscriber: Subscriber,
    priority: SubscriberPriority,
    filter: Option<EventFilter>,
    insertion_order: u64,
}

impl std::fmt::Debug for SubscriberEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberEntry")
            .field("subscriber", &self.subscriber)
            .field("priority", &self.priority)
            .field("filtered", &self.filter.is_some())
            .field("insertion_order", &self.insertion_order)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Per-kind buffers, subscribers and suppression flags.
pub struct EventBus {
    buffers: [Option<EventBuffer>; EVENT_KIND_COUNT],
    suppressed: [bool; EVENT_KIND_COUNT],
    subscribers: [Vec<SubscriberEntry>; EVENT_KIND_COUNT],

    /// Commands collected from reactive handlers during delivery. Drained by
    /// the restaurant into its command queue.
    pending_commands: Vec<Command>,

    default_capacity: usize,

    /// Registration counter; ties in priority keep registration order.
    next_insertion_order: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("buffers", &self.buffers)
            .field("suppressed", &self.suppressed)
            .field("pending_commands", &self.pending_commands)
            .field("default_capacity", &self.default_capacity)
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Create a new event bus with the given default buffer capacity per kind.
    pub fn new(default_capacity: usize) -> Self {
        Self {
            buffers: Default::default(),
            suppressed: [false; EVENT_KIND_COUNT],
            subscribers: Default::default(),
            pending_commands: Vec::new(),
            default_capacity,
            next_insertion_order: 0,
        }
    }

    /// Suppress an event kind. Suppressed events are never allocated or buffered.
    pub fn suppress(&mut self, kind: EventKind) {
        self.suppressed[kind.index()] = true;
        self.buffers[kind.index()] = None;
    }

    pub fn is_suppressed(&self, kind: EventKind) -> bool {
        self.suppressed[kind.index()]
    }

    /// Emit an event. No-ops if the event kind is suppressed.
    pub fn emit(&mut self, event: Event) {
        let idx = event.kind().index();
        if self.suppressed[idx] {
            return;
        }
        let capacity = self.default_capacity;
        self.buffers[idx]
            .get_or_insert_with(|| EventBuffer::new(capacity))
            .push(event);
    }

    /// Register a passive listener with normal priority and no filter.
    pub fn on_passive(&mut self, kind: EventKind, listener: PassiveListener) {
        self.on_passive_filtered(kind, SubscriberPriority::Normal, None, listener);
    }

    /// Register a reactive handler with normal priority and no filter.
    pub fn on_reactive(&mut self, kind: EventKind, handler: ReactiveHandler) {
        self.on_reactive_filtered(kind, SubscriberPriority::Normal, None, handler);
    }

    pub fn on_passive_filtered(
        &mut self,
        kind: EventKind,
        priority: SubscriberPriority,
        filter: Option<EventFilter>,
        listener: PassiveListener,
    ) {
        self.subscribe(kind, priority, filter, Subscriber::Passive(listener));
    }

    pub fn on_reactive_filtered(
        &mut self,
        kind: EventKind,
        priority: SubscriberPriority,
        filter: Option<EventFilter>,
        handler: ReactiveHandler,
    ) {
        self.subscribe(kind, priority, filter, Subscriber::Reactive(handler));
    }

    fn subscribe(
        &mut self,
        kind: EventKind,
        priority: SubscriberPriority,
        filter: Option<EventFilter>,
        subscriber: Subscriber,
    ) {
        let order = self.next_insertion_order;
        self.next_insertion_order += 1;
        let list = &mut self.subscribers[kind.index()];
        list.push(SubscriberEntry {
            subscriber,
            priority,
            filter,
            insertion_order: order,
        });
        list.sort_by_key(|entry| (entry.priority, entry.insertion_order));
    }

    /// Deliver all buffered events to subscribers, then clear the buffers.
    ///
    /// Kinds are visited in declaration order; within a kind, subscribers
    /// run by `(priority, registration order)` and see events oldest first.
    pub fn deliver(&mut self) {
        for idx in 0..EVENT_KIND_COUNT {
            let Some(buffer) = self.buffers[idx].as_mut() else {
                continue;
            };
            if buffer.is_empty() {
                continue;
            }

            let events = buffer.take_all();

            for entry in &mut self.subscribers[idx] {
                for event in &events {
                    if let Some(ref filter) = entry.filter
                        && !filter(event)
                    {
                        continue;
                    }
                    match &mut entry.subscriber {
                        Subscriber::Passive(listener) => listener(event),
                        Subscriber::Reactive(handler) => {
                            self.pending_commands.extend(handler(event));
                        }
                    }
                }
            }
        }
    }

    /// Take the commands produced by reactive handlers.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending_commands)
    }

    pub fn buffer(&self, kind: EventKind) -> Option<&EventBuffer> {
        self.buffers[kind.index()].as_ref()
    }

    /// Count of events currently buffered for a kind.
    pub fn buffered_count(&self, kind: EventKind) -> usize {
        self.buffers[kind.index()]
            .as_ref()
            .map(|b| b.len())
            .unwrap_or(0)
    }

    /// Total events ever emitted for a kind (including dropped).
    pub fn total_emitted(&self, kind: EventKind) -> u64 {
        self.buffers[kind.index()]
            .as_ref()
            .map(|b| b.total_written())
            .unwrap_or(0)
    }

    /// Clear all buffers. Subscribers and suppression settings stay.
    pub fn clear_all(&mut self) {
        for buffer in self.buffers.iter_mut().flatten() {
            buffer.clear();
        }
        self.pending_commands.clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
