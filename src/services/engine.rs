use std::collections::{HashMap, HashSet};

use crate::{
    config::Config,
    error::AppResult,
    models::{
        AlmostMakeable, CanonicalIngredient, Evaluation, FilterResult, NearMakeable,
        ResolvedIngredient,
    },
    services::{
        catalog::RecipeCatalog,
        feasibility::FeasibilityEvaluator,
        resolver::{normalize, IngredientResolver},
        shopping::ShoppingRecommender,
    },
};

/// Resolve → classify → recommend pipeline over an immutable catalog
///
/// Holds no mutable state; share it behind an `Arc` and call it from any number of
/// requests concurrently.
#[derive(Debug, Clone)]
pub struct CocktailEngine {
    catalog: RecipeCatalog,
    resolver: IngredientResolver,
    recommender: ShoppingRecommender,
}

impl CocktailEngine {
    pub fn new(
        catalog: RecipeCatalog,
        resolver: IngredientResolver,
        recommender: ShoppingRecommender,
    ) -> Self {
        Self {
            catalog,
            resolver,
            recommender,
        }
    }

    /// Engine over the catalog and ingredient tables bundled into the binary
    pub fn bundled() -> AppResult<Self> {
        Ok(Self::new(
            RecipeCatalog::bundled()?,
            IngredientResolver::bundled()?,
            ShoppingRecommender::default(),
        ))
    }

    /// Loads the catalog and ingredient tables named by the configuration
    ///
    /// Any defect here is an initialization failure; callers should abort startup.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                tracing::info!(path = %path, "Loading recipe catalog from file");
                RecipeCatalog::from_json(&std::fs::read_to_string(path)?)?
            }
            None => RecipeCatalog::bundled()?,
        };

        let resolver = match &config.ingredients_path {
            Some(path) => {
                tracing::info!(path = %path, "Loading ingredient tables from file");
                IngredientResolver::from_json(&std::fs::read_to_string(path)?)?
            }
            None => IngredientResolver::bundled()?,
        };

        Ok(Self::new(
            catalog,
            resolver,
            ShoppingRecommender::new(config.shopping_list_limit),
        ))
    }

    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    pub fn resolve(&self, raw: &str) -> CanonicalIngredient {
        self.resolver.resolve(raw)
    }

    /// Resolves every non-blank token, keeping input order
    pub fn resolve_all<S: AsRef<str>>(&self, raw_ingredients: &[S]) -> Vec<ResolvedIngredient> {
        raw_ingredients
            .iter()
            .map(|raw| raw.as_ref().trim())
            .filter(|raw| !raw.is_empty())
            .map(|raw| ResolvedIngredient {
                input: raw.to_string(),
                ingredient: self.resolver.resolve(raw),
            })
            .collect()
    }

    /// Evaluates what the user can make with the ingredients they listed
    ///
    /// With nothing to resolve, every collection is empty: no recipe is classified and
    /// no purchase is suggested.
    pub fn evaluate<S: AsRef<str>>(&self, raw_ingredients: &[S]) -> Evaluation {
        let resolved = self.resolve_all(raw_ingredients);
        if resolved.is_empty() {
            return Evaluation::default();
        }

        let owned: HashSet<CanonicalIngredient> = resolved
            .iter()
            .map(|entry| entry.ingredient.clone())
            .collect();

        let classification =
            FeasibilityEvaluator::new(self.resolver.aliases()).classify(&owned, &self.catalog);
        let shopping_list = self
            .recommender
            .recommend(&classification.almost, &classification.near);

        let evaluation = Evaluation {
            makeable: classification
                .makeable
                .iter()
                .map(|recipe| recipe.name.clone())
                .collect(),
            almost_makeable: classification
                .almost
                .into_iter()
                .map(|(recipe, missing)| AlmostMakeable {
                    name: recipe.name.clone(),
                    missing,
                })
                .collect(),
            near_makeable: classification
                .near
                .into_iter()
                .map(|(recipe, missing)| NearMakeable {
                    name: recipe.name.clone(),
                    missing,
                })
                .collect(),
            shopping_list,
            resolved,
        };

        tracing::debug!(
            ingredients = owned.len(),
            makeable = evaluation.makeable.len(),
            almost = evaluation.almost_makeable.len(),
            suggestions = evaluation.shopping_list.len(),
            "Evaluation completed"
        );

        evaluation
    }

    /// Splits generated recipe names into those the user can make and those to discard
    ///
    /// Matching is trimmed and case-insensitive against `evaluation.makeable`. Accepted
    /// names come back as the catalog spells them, without duplicates.
    pub fn filter_generated<S: AsRef<str>>(
        &self,
        evaluation: &Evaluation,
        candidates: &[S],
    ) -> FilterResult {
        let allowed: HashMap<String, &String> = evaluation
            .makeable
            .iter()
            .map(|name| (normalize(name), name))
            .collect();

        let mut result = FilterResult::default();
        for candidate in candidates {
            let candidate = candidate.as_ref();
            match allowed.get(&normalize(candidate)) {
                Some(name) => {
                    if !result.accepted.contains(*name) {
                        result.accepted.push((*name).clone());
                    }
                }
                None => result.rejected.push(candidate.to_string()),
            }
        }

        if !result.rejected.is_empty() {
            tracing::debug!(
                rejected = result.rejected.len(),
                "Discarded generated recipes outside the makeable set"
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogConfig, IngredientTables, Priority, Recipe, CONFIG_VERSION};

    fn create_test_engine() -> CocktailEngine {
        let catalog = RecipeCatalog::from_config(CatalogConfig {
            version: CONFIG_VERSION,
            recipes: vec![
                Recipe::new("Cuba Libre", "highball", &["rum", "cola", "lime"]),
                Recipe::new("Vodka Tonic", "highball", &["vodka", "tonic"]),
                Recipe::new("Whiskey Sour", "sour", &["whisky", "lemon", "sugar"]),
            ],
        })
        .unwrap();
        let resolver = IngredientResolver::from_tables(IngredientTables {
            version: CONFIG_VERSION,
            brands: vec![("jack daniels".to_string(), "whisky".into())],
            ..Default::default()
        })
        .unwrap();
        CocktailEngine::new(catalog, resolver, ShoppingRecommender::default())
    }

    #[test]
    fn test_evaluate_empty() {
        let engine = create_test_engine();
        let evaluation = engine.evaluate::<&str>(&[]);
        assert_eq!(evaluation, Evaluation::default());

        let evaluation = engine.evaluate(&["   ", ""]);
        assert!(evaluation.makeable.is_empty());
        assert!(evaluation.shopping_list.is_empty());
    }

    #[test]
    fn test_evaluate_makeable() {
        let engine = create_test_engine();
        let evaluation = engine.evaluate(&["Vodka", "tonic"]);
        assert_eq!(evaluation.makeable, vec!["Vodka Tonic".to_string()]);
    }

    #[test]
    fn test_evaluate_almost_with_brand() {
        let engine = create_test_engine();
        let evaluation = engine.evaluate(&["Jack Daniels", "sugar"]);

        assert_eq!(
            evaluation.almost_makeable,
            vec![AlmostMakeable {
                name: "Whiskey Sour".to_string(),
                missing: "lemon".into(),
            }]
        );
        assert_eq!(evaluation.shopping_list[0].ingredient, "lemon");
        assert_eq!(evaluation.shopping_list[0].priority, Priority::High);
        assert_eq!(evaluation.resolved[0].input, "Jack Daniels");
        assert_eq!(evaluation.resolved[0].ingredient, "whisky");
    }

    #[test]
    fn test_filter_generated() {
        let engine = create_test_engine();
        let evaluation = engine.evaluate(&["vodka", "tonic"]);

        let result = engine.filter_generated(
            &evaluation,
            &["vodka tonic", "Moonlight Fizz", " VODKA TONIC ", "Cuba Libre"],
        );

        assert_eq!(result.accepted, vec!["Vodka Tonic".to_string()]);
        assert_eq!(
            result.rejected,
            vec!["Moonlight Fizz".to_string(), "Cuba Libre".to_string()]
        );
    }

    #[test]
    fn test_from_default_config_uses_bundled_data() {
        let engine = CocktailEngine::from_config(&Config::default()).unwrap();
        assert!(engine.catalog().len() >= 100);
        assert_eq!(engine.resolve("Red Bull"), "energy_drink");
    }

    #[test]
    fn test_from_config_missing_file_fails() {
        let config = Config {
            catalog_path: Some("/nonexistent/catalog.json".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            CocktailEngine::from_config(&config),
            Err(crate::error::AppError::Io(_))
        ));
    }
}
