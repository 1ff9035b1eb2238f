use std::collections::HashMap;

use crate::models::{CanonicalIngredient, Priority, Recipe, ShoppingSuggestion};

/// Hard cap on the number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 3;

/// Credit for completing a recipe that is one ingredient short
const ALMOST_WEIGHT: f64 = 1.0;
/// Credit to each of the two ingredients a near-makeable recipe is missing
const NEAR_WEIGHT: f64 = 0.5;

/// Running total for one candidate ingredient
struct Tally {
    ingredient: CanonicalIngredient,
    weight: f64,
    completes_recipe: bool,
    recipes: Vec<String>,
}

impl Tally {
    fn priority(&self) -> Priority {
        if self.completes_recipe {
            Priority::High
        } else {
            Priority::Medium
        }
    }

    fn credit(&mut self, recipe: &Recipe, weight: f64) {
        self.weight += weight;
        if !self.recipes.contains(&recipe.name) {
            self.recipes.push(recipe.name.clone());
        }
    }
}

/// Ranks ingredient purchases by how many recipes they would help unlock
#[derive(Debug, Clone)]
pub struct ShoppingRecommender {
    limit: usize,
}

impl Default for ShoppingRecommender {
    fn default() -> Self {
        Self::new(MAX_SUGGESTIONS)
    }
}

impl ShoppingRecommender {
    /// Creates a recommender returning at most `limit` suggestions (clamped to 1..=3)
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.clamp(1, MAX_SUGGESTIONS),
        }
    }

    /// Builds the ranked suggestion list
    ///
    /// An almost-makeable recipe credits its missing ingredient 1.0 and marks it high
    /// priority. A near-makeable recipe credits 0.5 to each of its two missing
    /// ingredients. Ranking is priority, then weight descending; ties keep the order
    /// ingredients were first encountered (almost entries, then near entries).
    pub fn recommend(
        &self,
        almost: &[(&Recipe, CanonicalIngredient)],
        near: &[(&Recipe, [CanonicalIngredient; 2])],
    ) -> Vec<ShoppingSuggestion> {
        let mut tallies: Vec<Tally> = Vec::new();
        let mut index: HashMap<CanonicalIngredient, usize> = HashMap::new();

        let mut tally_for = |ingredient: &CanonicalIngredient, tallies: &mut Vec<Tally>| -> usize {
            *index.entry(ingredient.clone()).or_insert_with(|| {
                tallies.push(Tally {
                    ingredient: ingredient.clone(),
                    weight: 0.0,
                    completes_recipe: false,
                    recipes: Vec::new(),
                });
                tallies.len() - 1
            })
        };

        for (recipe, missing) in almost {
            let slot = tally_for(missing, &mut tallies);
            tallies[slot].credit(recipe, ALMOST_WEIGHT);
            tallies[slot].completes_recipe = true;
        }

        for (recipe, missing) in near {
            for ingredient in missing {
                let slot = tally_for(ingredient, &mut tallies);
                tallies[slot].credit(recipe, NEAR_WEIGHT);
            }
        }

        // Stable sort: equal keys keep first-encountered order
        tallies.sort_by(|a, b| {
            a.priority()
                .cmp(&b.priority())
                .then_with(|| b.weight.total_cmp(&a.weight))
        });
        tallies.truncate(self.limit);

        tallies
            .into_iter()
            .map(|tally| ShoppingSuggestion {
                priority: tally.priority(),
                unlocks_count: tally.weight.floor() as u32,
                ingredient: tally.ingredient,
                recipes: tally.recipes,
            })
            .collect()
    }
}
