use std::collections::HashSet;

use crate::models::{CanonicalIngredient, Recipe};
use crate::services::catalog::RecipeCatalog;
use crate::services::resolver::AliasGroups;

/// Catalog recipes bucketed by how many required ingredients are missing
///
/// Recipes three or more ingredients short are dropped. Every bucket follows catalog
/// order, and missing ids follow each recipe's declared requirement order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification<'a> {
    pub makeable: Vec<&'a Recipe>,
    pub almost: Vec<(&'a Recipe, CanonicalIngredient)>,
    pub near: Vec<(&'a Recipe, [CanonicalIngredient; 2])>,
}

/// Classifies catalog recipes against what the user owns
pub struct FeasibilityEvaluator<'a> {
    aliases: &'a AliasGroups,
}

impl<'a> FeasibilityEvaluator<'a> {
    pub fn new(aliases: &'a AliasGroups) -> Self {
        Self { aliases }
    }

    /// Required ingredients of `recipe` not covered by the (already expanded) owned set
    pub fn missing(
        recipe: &Recipe,
        expanded: &HashSet<CanonicalIngredient>,
    ) -> Vec<CanonicalIngredient> {
        recipe
            .required
            .iter()
            .filter(|ingredient| !expanded.contains(*ingredient))
            .cloned()
            .collect()
    }

    /// Buckets every recipe in the catalog. Optional ingredients are never consulted.
    pub fn classify<'c>(
        &self,
        owned: &HashSet<CanonicalIngredient>,
        catalog: &'c RecipeCatalog,
    ) -> Classification<'c> {
        let expanded = self.aliases.expand(owned);
        let mut classification = Classification::default();

        for recipe in catalog.iter() {
            let mut missing = Self::missing(recipe, &expanded).into_iter();
            match (missing.next(), missing.next(), missing.next()) {
                (None, _, _) => classification.makeable.push(recipe),
                (Some(only), None, _) => classification.almost.push((recipe, only)),
                (Some(first), Some(second), None) => {
                    classification.near.push((recipe, [first, second]))
                }
                _ => {}
            }
        }

        tracing::debug!(
            owned = owned.len(),
            makeable = classification.makeable.len(),
            almost = classification.almost.len(),
            near = classification.near.len(),
            "Catalog classified"
        );

        classification
    }
}
