use serde::{Deserialize, Serialize};

use super::CanonicalIngredient;

/// A cocktail recipe from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Display name, unique within a catalog (e.g. "Cuba Libre")
    pub name: String,
    /// Category tag (e.g. "highball", "sour")
    pub category: String,
    /// Ingredients that must all be on hand. Never empty in a loaded catalog.
    pub required: Vec<CanonicalIngredient>,
    /// Garnishes and extras; never affect feasibility
    #[serde(default)]
    pub optional: Vec<CanonicalIngredient>,
}

impl Recipe {
    /// Creates a recipe with no optional ingredients
    pub fn new(name: &str, category: &str, required: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            required: required.iter().map(|id| CanonicalIngredient::from(*id)).collect(),
            optional: Vec::new(),
        }
    }

    /// Adds optional ingredients
    pub fn with_optional(mut self, optional: &[&str]) -> Self {
        self.optional = optional.iter().map(|id| CanonicalIngredient::from(*id)).collect();
        self
    }
}

/// On-disk catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub version: u32,
    pub recipes: Vec<Recipe>,
}
