//! Configuration (env > `.env` file).

use std::collections::HashMap;

use crate::error::{GamesightError, Result};

/// Configuration for the three remote services.
///
/// Values come from environment variables (a `.env` file is honored) or
/// from explicit setters in tests.
#[derive(Debug, Clone, Default)]
pub struct GamesightConfig {
    values: HashMap<&'static str, String>,
}

/// Environment variables read by [`GamesightConfig::from_env`].
const ENV_KEYS: [&str; 8] = [
    "GAMESIGHT_API_KEY",
    "GAMESIGHT_AGENT_ID",
    "GAMESIGHT_AGENT_ALIAS_ID",
    "GAMESIGHT_ANSWERS_TABLE",
    "GAMESIGHT_CHART_MODEL_ID",
    "GAMESIGHT_AGENT_BASE_URL",
    "GAMESIGHT_STORE_BASE_URL",
    "GAMESIGHT_INFERENCE_BASE_URL",
];

impl GamesightConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (`.env` honored, ignore if absent).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::new();
        for key in ENV_KEYS {
            if let Ok(value) = std::env::var(key) {
                config.values.insert(key, value);
            }
        }
        config
    }

    /// Set a value by its environment-variable name.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        self.values.insert(key, value.into());
        self
    }

    /// Get a value by its environment-variable name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| GamesightError::Configuration(format!("Missing {key}")))
    }

    /// Bearer API key shared by all three services.
    pub fn api_key(&self) -> Result<&str> {
        self.require("GAMESIGHT_API_KEY")
    }

    /// Identifier of the hosted agent.
    pub fn agent_id(&self) -> Result<&str> {
        self.require("GAMESIGHT_AGENT_ID")
    }

    /// Alias of the hosted agent to invoke.
    pub fn agent_alias_id(&self) -> Result<&str> {
        self.require("GAMESIGHT_AGENT_ALIAS_ID")
    }

    /// Table holding persisted question/answer query results.
    pub fn answers_table(&self) -> Result<&str> {
        self.require("GAMESIGHT_ANSWERS_TABLE")
    }

    /// Model used for chart generation.
    pub fn chart_model_id(&self) -> Result<&str> {
        self.require("GAMESIGHT_CHART_MODEL_ID")
    }

    /// Base URL of the agent-orchestration endpoint.
    pub fn agent_base_url(&self) -> Result<&str> {
        self.require("GAMESIGHT_AGENT_BASE_URL")
    }

    /// Base URL of the query store.
    pub fn store_base_url(&self) -> Result<&str> {
        self.require("GAMESIGHT_STORE_BASE_URL")
    }

    /// Base URL of the model-inference endpoint.
    pub fn inference_base_url(&self) -> Result<&str> {
        self.require("GAMESIGHT_INFERENCE_BASE_URL")
    }
}
