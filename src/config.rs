//! The config module collects the secrets and identity the tool needs at start-up,
//! so collaborators receive them explicitly instead of reading the environment.

use log::{debug, info};

use crate::constants::{DEFAULT_USER_AGENT, MODEL_API_KEY_ENV_NAME, USER_AGENT_ENV_NAME};

/// Settings shared by the content loader and the model client.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// API key for the hosted model, if provided
    pub api_key: Option<String>,
    /// User agent sent when fetching pages
    pub user_agent: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(MODEL_API_KEY_ENV_NAME).filter(|key| !key.trim().is_empty());
        match api_key {
            Some(_) => info!("API key is provided via {MODEL_API_KEY_ENV_NAME}"),
            None => info!("{MODEL_API_KEY_ENV_NAME} is not set, calling the model without API key"),
        }

        let user_agent = lookup(USER_AGENT_ENV_NAME)
            .filter(|agent| !agent.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());
        debug!("Using user agent {user_agent}");

        Self {
            api_key,
            user_agent,
        }
    }
}
