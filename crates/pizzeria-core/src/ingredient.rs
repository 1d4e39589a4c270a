use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::PizzaId;

/// Every ingredient kind the kitchen knows about.
///
/// Tomatoes are not a topping: they go through the blender and come out as
/// [`IngredientKind::Sauce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientKind {
    Sauce,
    Cheese,
    Bacon,
    Pepperoni,
    Pineapple,
    Tomato,
}

impl IngredientKind {
    pub const ALL: [IngredientKind; 6] = [
        IngredientKind::Sauce,
        IngredientKind::Cheese,
        IngredientKind::Bacon,
        IngredientKind::Pepperoni,
        IngredientKind::Pineapple,
        IngredientKind::Tomato,
    ];

    /// Display name used in player-facing messages.
    pub fn name(self) -> &'static str {
        match self {
            IngredientKind::Sauce => "Sauce",
            IngredientKind::Cheese => "Cheese",
            IngredientKind::Bacon => "Bacon",
            IngredientKind::Pepperoni => "Pepperoni",
            IngredientKind::Pineapple => "Pineapple",
            IngredientKind::Tomato => "Tomato",
        }
    }

    /// Whether this kind can go directly on a pizza.
    pub fn is_topping(self) -> bool {
        !matches!(self, IngredientKind::Tomato)
    }

    /// Parse a snake_case or display name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for IngredientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kitchen tools the player can hold. Never food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    PizzaPeel,
    Knife,
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolKind::PizzaPeel => f.write_str("Pizza Peel"),
            ToolKind::Knife => f.write_str("Knife"),
        }
    }
}

/// Whatever the player has in hand when using a station or a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeldItem {
    Pizza(PizzaId),
    Ingredient(IngredientKind),
    Tool(ToolKind),
}
