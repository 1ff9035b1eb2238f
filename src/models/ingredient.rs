use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CanonicalIngredient;

/// On-disk format of the ingredient vocabulary tables
///
/// `brands` is ordered: keys are matched as substrings of the input token.
/// `synonyms` are exact matches on the lower-cased, trimmed token, kept in file order.
/// `alias_groups` maps a required ingredient to the substitutes that also satisfy it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientTables {
    pub version: u32,
    #[serde(default)]
    pub brands: Vec<(String, CanonicalIngredient)>,
    #[serde(default, with = "ordered_pairs")]
    pub synonyms: Vec<(String, CanonicalIngredient)>,
    #[serde(default)]
    pub alias_groups: BTreeMap<CanonicalIngredient, Vec<CanonicalIngredient>>,
}

/// A JSON object read as key/value pairs in document order, repeated keys included
mod ordered_pairs {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::CanonicalIngredient;

    pub fn serialize<S>(pairs: &[(String, CanonicalIngredient)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, CanonicalIngredient)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<(String, CanonicalIngredient)>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of words to canonical ingredients")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(pair) = access.next_entry()? {
                    pairs.push(pair);
                }
                Ok(pairs)
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}
