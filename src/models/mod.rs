use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod ingredient;
pub mod recipe;
pub mod suggestion;

pub use ingredient::IngredientTables;
pub use recipe::{CatalogConfig, Recipe};
pub use suggestion::{Priority, ShoppingSuggestion};

/// Version of the catalog and ingredient-table file formats this build understands
pub const CONFIG_VERSION: u32 = 1;

/// Normalized ingredient identifier (e.g. "whisky", "soda_water", "lemon_vodka")
///
/// Two raw tokens name the same ingredient iff they resolve to the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalIngredient(String);

impl CanonicalIngredient {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CanonicalIngredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CanonicalIngredient {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for CanonicalIngredient {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalIngredient {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// Evaluation Types
// ============================================================================

/// Result of evaluating a user's ingredient list against the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Recipes that can be made right now. Authoritative allow-list for generated recipe names.
    pub makeable: Vec<String>,
    /// Recipes exactly one required ingredient short
    pub almost_makeable: Vec<AlmostMakeable>,
    /// Recipes exactly two required ingredients short
    pub near_makeable: Vec<NearMakeable>,
    /// Ranked purchase suggestions (at most 3)
    pub shopping_list: Vec<ShoppingSuggestion>,
    /// How each non-blank input token was interpreted
    pub resolved: Vec<ResolvedIngredient>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlmostMakeable {
    pub name: String,
    pub missing: CanonicalIngredient,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearMakeable {
    pub name: String,
    pub missing: [CanonicalIngredient; 2],
}

/// A raw input token and the canonical ingredient it resolved to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedIngredient {
    pub input: String,
    pub ingredient: CanonicalIngredient,
}

/// Outcome of checking generated recipe names against the makeable set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterResult {
    /// Candidates that name a makeable recipe, as the catalog spells them
    pub accepted: Vec<String>,
    /// Candidates that must be discarded
    pub rejected: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_ingredient_display() {
        let id = CanonicalIngredient::new("soda_water");
        assert_eq!(format!("{}", id), "soda_water");
        assert_eq!(id, "soda_water");
    }

    #[test]
    fn test_canonical_ingredient_serde_is_transparent() {
        let id = CanonicalIngredient::from("lemon_vodka");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""lemon_vodka""#);

        let deserialized: CanonicalIngredient = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn test_evaluation_serializes_camel_case() {
        let evaluation = Evaluation {
            makeable: vec!["Vodka Tonic".to_string()],
            almost_makeable: vec![AlmostMakeable {
                name: "Cuba Libre".to_string(),
                missing: "lime".into(),
            }],
            near_makeable: vec![NearMakeable {
                name: "Daiquiri".to_string(),
                missing: ["lime".into(), "simple_syrup".into()],
            }],
            shopping_list: vec![],
            resolved: vec![],
        };

        let json = serde_json::to_value(&evaluation).unwrap();
        assert_eq!(json["makeable"][0], "Vodka Tonic");
        assert_eq!(json["almostMakeable"][0]["name"], "Cuba Libre");
        assert_eq!(json["almostMakeable"][0]["missing"], "lime");
        assert_eq!(json["nearMakeable"][0]["missing"][1], "simple_syrup");
        assert!(json["shoppingList"].as_array().unwrap().is_empty());
    }
}
