//! Read-only views of restaurant state for UI and host code.
//!
//! All types are owned copies -- no references into internal storage.

use crate::customer::{CustomerState, Resolution};
use crate::engine::Restaurant;
use crate::fixed::{Fixed64, Seconds, fixed64_to_f64};
use crate::id::{CustomerId, Location};
use crate::ingredient::IngredientKind;

// ---------------------------------------------------------------------------
// Order board
// ---------------------------------------------------------------------------

/// One line of the order board: who is waiting, for what, and how long
/// they will keep waiting.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub customer: CustomerId,
    pub name: String,
    /// Comma-separated ingredient names.
    pub order: String,
    /// Patience left in seconds, one decimal place.
    pub time_left: String,
}

// ---------------------------------------------------------------------------
// Customer snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSnapshot {
    pub id: CustomerId,
    pub name: String,
    pub state: CustomerState,
    pub seat_location: Location,
    pub exit: Location,
    pub patience_remaining: Seconds,
    /// Remaining patience as a 0..1 fraction.
    pub patience_fraction: Fixed64,
    /// Empty until the customer has sat down and ordered.
    pub order: Vec<IngredientKind>,
    pub resolution: Option<Resolution>,
}

impl Restaurant {
    /// Rows for every seated customer still waiting for food.
    pub fn order_board(&self) -> Vec<OrderRow> {
        self.customers
            .iter()
            .filter(|(_, c)| c.is_waiting())
            .map(|(id, c)| OrderRow {
                customer: id,
                name: c.name().to_owned(),
                order: c.order().map(|o| o.describe()).unwrap_or_default(),
                time_left: format!("{:.1}", fixed64_to_f64(c.patience().remaining())),
            })
            .collect()
    }

    /// Customers seated and waiting for food (the bell count).
    pub fn waiting_count(&self) -> usize {
        self.customers.values().filter(|c| c.is_waiting()).count()
    }

    pub fn snapshot_customer(&self, id: CustomerId) -> Option<CustomerSnapshot> {
        let c = self.customers.get(id)?;
        Some(CustomerSnapshot {
            id,
            name: c.name().to_owned(),
            state: c.state(),
            seat_location: c.seat_location(),
            exit: c.exit(),
            patience_remaining: c.patience().remaining(),
            patience_fraction: c.patience_fraction(),
            order: c
                .order()
                .map(|o| o.ingredients().iter().copied().collect())
                .unwrap_or_default(),
            resolution: c.resolution(),
        })
    }

    pub fn snapshot_all_customers(&self) -> Vec<CustomerSnapshot> {
        self.customers
            .keys()
            .filter_map(|id| self.snapshot_customer(id))
            .collect()
    }

    /// Mood face index for a customer, given `faces` sprites.
    pub fn customer_mood(&self, id: CustomerId, faces: usize) -> Option<usize> {
        self.customers.get(id).map(|c| c.mood_index(faces))
    }

    pub fn level_name(&self) -> &'static str {
        self.progression.level_name()
    }

    pub fn difficulty_multiplier(&self) -> f64 {
        self.progression.difficulty_multiplier()
    }

    pub fn day_progress(&self) -> Fixed64 {
        self.progression.day_progress()
    }
}
