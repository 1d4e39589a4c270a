//! The seat pool: claimable places where customers wait for their food.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::error::RestaurantError;
use crate::id::{CustomerId, Location, SeatId};
use crate::rng::SimRng;

/// One seat at the counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub location: Location,
    occupant: Option<CustomerId>,
}

impl Seat {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            occupant: None,
        }
    }

    pub fn occupant(&self) -> Option<CustomerId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Give the seat to `customer`. Claiming a seat you already hold is fine;
    /// claiming someone else's is `SeatUnavailable`.
    pub fn claim(&mut self, customer: CustomerId) -> Result<(), RestaurantError> {
        match self.occupant {
            None => {
                self.occupant = Some(customer);
                Ok(())
            }
            Some(holder) if holder == customer => Ok(()),
            Some(_) => Err(RestaurantError::SeatUnavailable),
        }
    }

    /// Free the seat if `customer` holds it. Returns whether anything changed.
    pub fn release(&mut self, customer: CustomerId) -> bool {
        if self.occupant == Some(customer) {
            self.occupant = None;
            true
        } else {
            false
        }
    }
}

/// All seats in the restaurant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatPool {
    seats: SlotMap<SeatId, Seat>,
}

impl SeatPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        let mut pool = Self::new();
        for location in locations {
            pool.add(location);
        }
        pool
    }

    pub fn add(&mut self, location: Location) -> SeatId {
        self.seats.insert(Seat::new(location))
    }

    pub fn get(&self, id: SeatId) -> Option<&Seat> {
        self.seats.get(id)
    }

    pub fn get_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.seats.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn free_count(&self) -> usize {
        self.seats.values().filter(|s| !s.is_occupied()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &Seat)> {
        self.seats.iter()
    }

    /// Pick a uniformly random free seat without claiming it.
    pub fn pick_free(&self, rng: &mut SimRng) -> Option<SeatId> {
        let free: Vec<SeatId> = self
            .seats
            .iter()
            .filter(|(_, seat)| !seat.is_occupied())
            .map(|(id, _)| id)
            .collect();
        rng.pick(&free).copied()
    }

    /// Release whatever seat `customer` holds. Returns the freed seat.
    pub fn release_held_by(&mut self, customer: CustomerId) -> Option<SeatId> {
        let (id, seat) = self
            .seats
            .iter_mut()
            .find(|(_, seat)| seat.occupant() == Some(customer))?;
        seat.release(customer);
        Some(id)
    }

    /// Free every seat.
    pub fn clear_occupants(&mut self) {
        for seat in self.seats.values_mut() {
            seat.occupant = None;
        }
    }
}
