use crate::id::{CustomerId, OvenId, PizzaId};

/// Errors returned by restaurant operations.
///
/// None of these are fatal to the simulation. `SeatUnavailable` means "try
/// again later", `InvalidAction` carries a message meant for the player, and
/// `InvariantViolation` flags a logic fault in the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestaurantError {
    /// No free seat (at spawn time), or the seat is held by someone else.
    #[error("no seat available")]
    SeatUnavailable,

    /// The player tried something the kitchen does not allow.
    #[error("{message}")]
    InvalidAction { message: String },

    /// A state transition the model forbids, such as resolving a customer twice.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("unknown customer {0:?}")]
    UnknownCustomer(CustomerId),

    #[error("unknown pizza {0:?}")]
    UnknownPizza(PizzaId),

    #[error("unknown oven {0:?}")]
    UnknownOven(OvenId),

    /// The player ran out of health; only `restart()` is accepted.
    #[error("game over")]
    GameOver,
}

impl RestaurantError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RestaurantError::InvalidAction {
            message: message.into(),
        }
    }

    /// The player-facing text for an `InvalidAction`, if this is one.
    pub fn player_message(&self) -> Option<&str> {
        match self {
            RestaurantError::InvalidAction { message } => Some(message),
            _ => None,
        }
    }
}
