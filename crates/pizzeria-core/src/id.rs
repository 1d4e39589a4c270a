use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a customer currently in the restaurant.
    pub struct CustomerId;

    /// Identifies a seat in the restaurant's seat pool.
    pub struct SeatId;

    /// Identifies a pizza from dough to consumption.
    pub struct PizzaId;

    /// Identifies an oven.
    pub struct OvenId;
}

/// An abstract position token (seat, entry door, exit door). The host engine
/// maps it to a world transform; the core only compares and forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_equality() {
        assert_eq!(Location(3), Location(3));
        assert_ne!(Location(3), Location(4));
    }

    #[test]
    fn keys_from_distinct_maps_are_hashable() {
        use slotmap::SlotMap;
        use std::collections::HashMap;

        let mut customers = SlotMap::<CustomerId, ()>::with_key();
        let a = customers.insert(());
        let b = customers.insert(());

        let mut names = HashMap::new();
        names.insert(a, "Alice");
        names.insert(b, "Bob");
        assert_eq!(names[&a], "Alice");
        assert_eq!(names[&b], "Bob");
    }

    #[test]
    fn removed_key_is_stale() {
        use slotmap::SlotMap;

        let mut pizzas = SlotMap::<PizzaId, u32>::with_key();
        let p = pizzas.insert(1);
        pizzas.remove(p);
        let q = pizzas.insert(2);
        assert_ne!(p, q);
        assert!(pizzas.get(p).is_none());
    }
}
