//! Customer orders: which toppings a served pizza must carry.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ingredient::IngredientKind;
use crate::pizza::{CookState, Pizza};
use crate::rng::SimRng;

/// How optional toppings are drawn when an order is generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSampling {
    /// Draw a trial count uniformly from `[0, pool size]`, then for each
    /// trial pick a uniform pool entry, discarding repeats. Orders with few
    /// distinct optionals come up more often than a uniform subset would give.
    #[default]
    TrialsWithRepeats,
    /// Include each optional independently with probability one half.
    UniformSubset,
}

/// How strictly a served pizza is compared against the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Every ordered topping must be present; extras are tolerated.
    #[default]
    Superset,
    /// The toppings must be exactly the ordered set.
    Exact,
}

/// An immutable set of ingredients a customer wants on a cooked pizza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    ingredients: BTreeSet<IngredientKind>,
}

impl Order {
    /// Build an order from an explicit ingredient list. Duplicates collapse.
    pub fn from_ingredients(kinds: impl IntoIterator<Item = IngredientKind>) -> Self {
        Self {
            ingredients: kinds.into_iter().collect(),
        }
    }

    /// Generate a random order: all of `required`, plus optionals drawn from
    /// `optional_pool` according to `sampling`.
    pub fn generate(
        required: &[IngredientKind],
        optional_pool: &[IngredientKind],
        sampling: OrderSampling,
        rng: &mut SimRng,
    ) -> Self {
        let mut ingredients: BTreeSet<IngredientKind> = required.iter().copied().collect();

        match sampling {
            OrderSampling::TrialsWithRepeats => {
                let trials = rng.up_to(optional_pool.len());
                for _ in 0..trials {
                    if let Some(kind) = rng.pick(optional_pool) {
                        ingredients.insert(*kind);
                    }
                }
            }
            OrderSampling::UniformSubset => {
                for kind in optional_pool {
                    if rng.coin() {
                        ingredients.insert(*kind);
                    }
                }
            }
        }

        let order = Self { ingredients };
        log::debug!("order generated: {}", order.describe());
        order
    }

    pub fn ingredients(&self) -> &BTreeSet<IngredientKind> {
        &self.ingredients
    }

    pub fn contains(&self, kind: IngredientKind) -> bool {
        self.ingredients.contains(&kind)
    }

    /// Whether `pizza` satisfies this order. The pizza must be exactly
    /// cooked; toppings are compared according to `policy`.
    pub fn matches(&self, pizza: &Pizza, policy: MatchPolicy) -> bool {
        if pizza.cook_state() != CookState::Cooked {
            return false;
        }
        match policy {
            MatchPolicy::Superset => self.ingredients.is_subset(pizza.ingredients()),
            MatchPolicy::Exact => &self.ingredients == pizza.ingredients(),
        }
    }

    /// Comma-separated ingredient names, for the order board.
    pub fn describe(&self) -> String {
        self.ingredients
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
