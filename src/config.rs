use serde::{Deserialize, Serialize};

use crate::error::SeedError;
use crate::seed::SeedPlan;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub collections: CollectionsConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: String,
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionsConfig {
    pub agents: Option<String>,
    pub reviews: Option<String>,
    pub galleries: Option<String>,
    pub properties: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub agents: usize,
    pub reviews: usize,
    pub properties: usize,
    /// Fixed seed for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: None,
            api_key: None,
            database_id: None,
            request_timeout_ms: 30_000,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        let plan = SeedPlan::default();
        Self {
            agents: plan.agents,
            reviews: plan.reviews,
            properties: plan.properties,
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    pub fn plan(&self) -> SeedPlan {
        SeedPlan {
            agents: self.agents,
            reviews: self.reviews,
            properties: self.properties,
            ..SeedPlan::default()
        }
    }
}

/// Fully resolved identifiers of the database and the four listing collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionIds {
    pub database_id: String,
    pub agents: String,
    pub reviews: String,
    pub galleries: String,
    pub properties: String,
}

impl CollectionIds {
    /// Collections in the order they are cleared.
    pub fn in_clear_order(&self) -> [&str; 4] {
        [
            self.agents.as_str(),
            self.reviews.as_str(),
            self.galleries.as_str(),
            self.properties.as_str(),
        ]
    }
}

impl CollectionsConfig {
    pub fn resolve(&self, database_id: Option<&str>) -> Result<CollectionIds, SeedError> {
        Ok(CollectionIds {
            database_id: required("Missing database ID", database_id)?,
            agents: required("Missing collection ID for AGENT", self.agents.as_deref())?,
            reviews: required("Missing collection ID for REVIEWS", self.reviews.as_deref())?,
            galleries: required("Missing collection ID for GALLERY", self.galleries.as_deref())?,
            properties: required("Missing collection ID for PROPERTY", self.properties.as_deref())?,
        })
    }
}

fn required(message: &str, value: Option<&str>) -> Result<String, SeedError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(SeedError::Configuration(message.to_string())),
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Environment variables, e.g. RESTATE_STORE__DATABASE_ID
        config = config.add_source(
            config::Environment::with_prefix("RESTATE")
                .separator("__")
                .prefix_separator("_"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Database and collection ids, failing on the first one missing.
    pub fn collection_ids(&self) -> Result<CollectionIds, SeedError> {
        self.collections.resolve(self.store.database_id.as_deref())
    }
}
