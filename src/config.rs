use serde::Deserialize;

use crate::services::shopping::MAX_SUGGESTIONS;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Recipe catalog JSON file. The bundled catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Ingredient tables JSON file (brands, synonyms, alias groups). Bundled tables when unset.
    #[serde(default)]
    pub ingredients_path: Option<String>,

    /// Maximum shopping suggestions per evaluation, clamped to 1..=3
    #[serde(default = "default_shopping_list_limit")]
    pub shopping_list_limit: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_shopping_list_limit() -> usize {
    MAX_SUGGESTIONS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: None,
            ingredients_path: None,
            shopping_list_limit: default_shopping_list_limit(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
