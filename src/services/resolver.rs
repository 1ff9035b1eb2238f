use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{CanonicalIngredient, IngredientTables, CONFIG_VERSION};
use crate::services::catalog::CatalogError;

/// Ingredient tables bundled into the binary, used when no path is configured
pub const BUNDLED_INGREDIENTS: &str = include_str!("../../data/ingredients.json");

/// Lower-cases and trims a raw token, the form every lookup works on
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Accepted substitutes for required ingredients
///
/// Each group contains its own head, so owning the head or any member satisfies it.
#[derive(Debug, Clone, Default)]
pub struct AliasGroups {
    groups: HashMap<CanonicalIngredient, HashSet<CanonicalIngredient>>,
}

impl AliasGroups {
    pub fn new(groups: BTreeMap<CanonicalIngredient, Vec<CanonicalIngredient>>) -> Self {
        let groups = groups
            .into_iter()
            .map(|(head, members)| {
                let mut group: HashSet<CanonicalIngredient> = members.into_iter().collect();
                group.insert(head.clone());
                (head, group)
            })
            .collect();
        Self { groups }
    }

    /// Ingredients that satisfy a requirement for `ingredient`, if it has substitutes
    pub fn group(&self, ingredient: &CanonicalIngredient) -> Option<&HashSet<CanonicalIngredient>> {
        self.groups.get(ingredient)
    }

    /// Adds every group head satisfied by something the user owns
    pub fn expand(&self, owned: &HashSet<CanonicalIngredient>) -> HashSet<CanonicalIngredient> {
        let mut expanded = owned.clone();
        for (head, group) in &self.groups {
            if !group.is_disjoint(owned) {
                expanded.insert(head.clone());
            }
        }
        expanded
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Maps raw ingredient tokens (brands, localized words, plain names) to canonical ids
#[derive(Debug, Clone)]
pub struct IngredientResolver {
    /// Brand keys, longest first; equal lengths keep table order
    brands: Vec<(String, CanonicalIngredient)>,
    synonyms: HashMap<String, CanonicalIngredient>,
    aliases: AliasGroups,
}

impl IngredientResolver {
    /// Validates the ingredient tables and builds the resolver
    ///
    /// A repeated brand key or synonym (after normalization) keeps its first definition.
    /// Conflicting repeats are logged rather than rejected so the table owner can decide
    /// which mapping is intended.
    pub fn from_tables(tables: IngredientTables) -> Result<Self, CatalogError> {
        if tables.version != CONFIG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                source_name: "ingredient tables",
                found: tables.version,
            });
        }

        let mut seen: HashMap<String, CanonicalIngredient> = HashMap::new();
        let mut brands = Vec::with_capacity(tables.brands.len());

        for (key, ingredient) in tables.brands {
            let key = normalize(&key);
            if key.is_empty() {
                return Err(CatalogError::EmptyAlias { ingredient });
            }

            match seen.get(&key) {
                Some(existing) if *existing != ingredient => {
                    tracing::warn!(
                        alias = %key,
                        kept = %existing,
                        ignored = %ingredient,
                        "Conflicting brand alias, keeping first definition"
                    );
                }
                Some(_) => {
                    tracing::debug!(alias = %key, "Duplicate brand alias ignored");
                }
                None => {
                    seen.insert(key.clone(), ingredient.clone());
                    brands.push((key, ingredient));
                }
            }
        }

        // Longest match first; sort_by is stable so ties keep table order
        brands.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        let mut synonyms: HashMap<String, CanonicalIngredient> = HashMap::new();
        for (word, ingredient) in tables.synonyms {
            let word = normalize(&word);
            if word.is_empty() {
                continue;
            }

            match synonyms.get(&word) {
                Some(existing) if *existing != ingredient => {
                    tracing::warn!(
                        synonym = %word,
                        kept = %existing,
                        ignored = %ingredient,
                        "Conflicting synonym, keeping first definition"
                    );
                }
                Some(_) => {}
                None => {
                    synonyms.insert(word, ingredient);
                }
            }
        }

        let aliases = AliasGroups::new(tables.alias_groups);

        tracing::info!(
            brands = brands.len(),
            synonyms = synonyms.len(),
            alias_groups = aliases.len(),
            "Ingredient tables loaded"
        );

        Ok(Self {
            brands,
            synonyms,
            aliases,
        })
    }

    /// Parses ingredient tables from their JSON representation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let tables: IngredientTables =
            serde_json::from_str(json).map_err(|source| CatalogError::Malformed {
                source_name: "ingredient tables",
                source,
            })?;
        Self::from_tables(tables)
    }

    /// Loads the ingredient tables bundled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_INGREDIENTS)
    }

    /// Resolves a raw token to its canonical ingredient
    ///
    /// Brand keys contained in the token win first, then exact synonyms. An unknown
    /// token is its own canonical id, so this never fails.
    pub fn resolve(&self, raw: &str) -> CanonicalIngredient {
        let token = normalize(raw);

        if let Some((_, ingredient)) = self
            .brands
            .iter()
            .find(|(key, _)| token.contains(key.as_str()))
        {
            return ingredient.clone();
        }

        if let Some(ingredient) = self.synonyms.get(&token) {
            return ingredient.clone();
        }

        CanonicalIngredient::new(token)
    }

    pub fn aliases(&self) -> &AliasGroups {
        &self.aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> IngredientTables {
        IngredientTables {
            version: CONFIG_VERSION,
            brands: vec![
                ("absolut".to_string(), "vodka".into()),
                ("jack daniels".to_string(), "whisky".into()),
                ("absolut citron".to_string(), "lemon_vodka".into()),
                ("Red Bull".to_string(), "energy_drink".into()),
            ],
            synonyms: vec![
                ("cytryna".to_string(), "lemon".into()),
                ("mleko".to_string(), "milk".into()),
            ],
            alias_groups: [(
                CanonicalIngredient::from("cream"),
                vec![CanonicalIngredient::from("baileys"), CanonicalIngredient::from("milk")],
            )]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn test_brand_substring_match() {
        let resolver = IngredientResolver::from_tables(tables()).unwrap();
        assert_eq!(resolver.resolve("Jack Daniels"), "whisky");
        assert_eq!(resolver.resolve("  jack daniels honey "), "whisky");
        assert_eq!(resolver.resolve("red bull sugarfree"), "energy_drink");
    }

    #[test]
    fn test_longest_brand_wins() {
        let resolver = IngredientResolver::from_tables(tables()).unwrap();
        assert_eq!(resolver.resolve("Absolut Citron"), "lemon_vodka");
        assert_eq!(resolver.resolve("absolut blue"), "vodka");
    }

    #[test]
    fn test_synonym_is_exact_match() {
        let resolver = IngredientResolver::from_tables(tables()).unwrap();
        assert_eq!(resolver.resolve("Cytryna"), "lemon");
        assert_eq!(resolver.resolve("cytryna juice"), "cytryna juice");
    }

    #[test]
    fn test_unknown_token_falls_back_to_normalized_form() {
        let resolver = IngredientResolver::from_tables(tables()).unwrap();
        assert_eq!(resolver.resolve("  Dragonfruit "), "dragonfruit");
        assert_eq!(resolver.resolve(""), "");
    }

    #[test]
    fn test_duplicate_brand_keeps_first() {
        let mut tables = tables();
        tables.brands.push(("jack daniels".to_string(), "bourbon".into()));

        let resolver = IngredientResolver::from_tables(tables).unwrap();
        assert_eq!(resolver.resolve("jack daniels"), "whisky");
    }

    #[test]
    fn test_colliding_synonyms_keep_first() {
        let json = r#"{
            "version": 1,
            "synonyms": {"Cytryna": "lemon", "cytryna": "lime", "CYTRYNA ": "orange"}
        }"#;

        for _ in 0..20 {
            let resolver = IngredientResolver::from_json(json).unwrap();
            assert_eq!(resolver.resolve("cytryna"), "lemon");
        }
    }

    #[test]
    fn test_empty_brand_key_rejected() {
        let mut tables = tables();
        tables.brands.push(("   ".to_string(), "gin".into()));

        let result = IngredientResolver::from_tables(tables);
        assert!(matches!(result, Err(CatalogError::EmptyAlias { .. })));
    }

    #[test]
    fn test_unsupported_version() {
        let mut tables = tables();
        tables.version = 7;
        assert!(matches!(
            IngredientResolver::from_tables(tables),
            Err(CatalogError::UnsupportedVersion { found: 7, .. })
        ));
    }

    #[test]
    fn test_alias_expansion() {
        let resolver = IngredientResolver::from_tables(tables()).unwrap();
        let owned: HashSet<CanonicalIngredient> =
            [CanonicalIngredient::from("baileys"), CanonicalIngredient::from("rum")]
                .into_iter()
                .collect();

        let expanded = resolver.aliases().expand(&owned);
        assert!(expanded.contains(&CanonicalIngredient::from("cream")));
        assert!(expanded.contains(&CanonicalIngredient::from("baileys")));
        assert!(!expanded.contains(&CanonicalIngredient::from("milk")));
    }

    #[test]
    fn test_alias_group_contains_head() {
        let aliases = IngredientResolver::from_tables(tables()).unwrap().aliases().clone();
        let group = aliases.group(&"cream".into()).unwrap();
        assert!(group.contains(&CanonicalIngredient::from("cream")));
        assert_eq!(group.len(), 3);
        assert!(aliases.group(&"gin".into()).is_none());
    }

    #[test]
    fn test_bundled_tables() {
        let resolver = IngredientResolver::bundled().unwrap();
        assert_eq!(resolver.resolve("Jack Daniels"), "whisky");
        assert_eq!(resolver.resolve("Cytrynówka"), "lemon_vodka");
        assert_eq!(resolver.resolve("Red Bull"), "energy_drink");
        assert_eq!(resolver.resolve("cytryna"), "lemon");
        assert_eq!(resolver.resolve("Schweppes Ginger Ale"), "ginger_ale");
        assert_eq!(resolver.resolve("Schweppes"), "tonic");
    }
}
