use std::collections::HashSet;

use thiserror::Error;

use crate::models::{CanonicalIngredient, CatalogConfig, Recipe, CONFIG_VERSION};

/// Catalog bundled into the binary, used when no catalog path is configured
pub const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Configuration defects detected while loading the catalog or ingredient tables
///
/// These are fatal at startup and never surface per request.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Recipe '{recipe}' has no required ingredients")]
    EmptyRequired { recipe: String },
    #[error("Recipe '{recipe}' is defined more than once")]
    DuplicateRecipe { recipe: String },
    #[error("Brand alias for '{ingredient}' has an empty key")]
    EmptyAlias { ingredient: CanonicalIngredient },
    #[error("Unsupported {source_name} version {found} (expected {})", CONFIG_VERSION)]
    UnsupportedVersion {
        source_name: &'static str,
        found: u32,
    },
    #[error("Malformed {source_name}: {source}")]
    Malformed {
        source_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable, ordered table of recipes
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// Validates a catalog configuration and builds the catalog
    ///
    /// Requirement lists are deduplicated, keeping their declared order.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.version != CONFIG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                source_name: "catalog",
                found: config.version,
            });
        }

        let mut seen_names: HashSet<String> = HashSet::new();
        let mut recipes = Vec::with_capacity(config.recipes.len());

        for mut recipe in config.recipes {
            if recipe.required.is_empty() {
                return Err(CatalogError::EmptyRequired {
                    recipe: recipe.name,
                });
            }
            if !seen_names.insert(recipe.name.clone()) {
                return Err(CatalogError::DuplicateRecipe {
                    recipe: recipe.name,
                });
            }

            let mut seen_ingredients = HashSet::new();
            recipe
                .required
                .retain(|ingredient| seen_ingredients.insert(ingredient.clone()));

            recipes.push(recipe);
        }

        tracing::info!(recipes = recipes.len(), "Recipe catalog loaded");

        Ok(Self { recipes })
    }

    /// Parses a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig =
            serde_json::from_str(json).map_err(|source| CatalogError::Malformed {
                source_name: "catalog",
                source,
            })?;
        Self::from_config(config)
    }

    /// Loads the catalog bundled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Finds a recipe by exact name
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.recipes
            .iter()
            .map(|recipe| recipe.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Recipes in a category (case-insensitive), or all recipes when no category is given
    pub fn by_category<'a>(&'a self, category: Option<&'a str>) -> impl Iterator<Item = &'a Recipe> {
        self.recipes.iter().filter(move |recipe| match category {
            Some(category) => recipe.category.eq_ignore_ascii_case(category.trim()),
            None => true,
        })
    }
}
