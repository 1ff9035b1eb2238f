pub mod catalog;
pub mod engine;
pub mod feasibility;
pub mod resolver;
pub mod shopping;

pub use catalog::{CatalogError, RecipeCatalog};
pub use engine::CocktailEngine;
pub use feasibility::{Classification, FeasibilityEvaluator};
pub use resolver::{AliasGroups, IngredientResolver};
pub use shopping::ShoppingRecommender;
