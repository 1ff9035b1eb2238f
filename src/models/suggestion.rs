use serde::{Deserialize, Serialize};

use super::CanonicalIngredient;

/// Priority of a shopping suggestion
///
/// Ordering puts `High` before `Medium`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Buying this completes at least one almost-makeable recipe
    High,
    /// Only contributes to recipes that are two ingredients short
    Medium,
}

/// A ranked ingredient purchase and the recipes it would help unlock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingSuggestion {
    pub ingredient: CanonicalIngredient,
    pub unlocks_count: u32,
    pub priority: Priority,
    /// Contributing recipes, first-seen order, no duplicates
    pub recipes: Vec<String>,
}
