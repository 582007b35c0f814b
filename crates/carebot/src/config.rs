use config::{Config, Environment};
use serde::Deserialize;

use crate::errors::{to_env_var, ConfigError};

/// Placeholder used when no agent runtime key is configured.
pub const PLACEHOLDER_AGENT_KEY: &str = "MOCK_API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new<U: Into<String>, K: Into<String>>(url: U, anon_key: K) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }

    /// Full URL of a backend function endpoint
    pub fn function_url(&self, endpoint: &str) -> String {
        format!(
            "{}/functions/v1/{}",
            self.url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub api_key: String,
}

impl AgentConfig {
    pub fn is_placeholder(&self) -> bool {
        self.api_key == PLACEHOLDER_AGENT_KEY
    }
}

#[derive(Debug, Deserialize)]
struct RawBackend {
    url: Option<String>,
    #[serde(default)]
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct RawAgent {
    #[serde(default = "default_agent_key")]
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    backend: RawBackend,
    agent: RawAgent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend: BackendConfig,
    pub agent: AgentConfig,
}

impl Settings {
    /// Load settings from `CAREBOT_*` environment variables
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("backend.anon_key", "")?
            .set_default("agent.api_key", default_agent_key())?
            .add_source(
                Environment::with_prefix("CAREBOT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let raw: RawSettings = config.try_deserialize()?;

        let url = raw
            .backend
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar {
                env_var: to_env_var("backend.url"),
            })?;

        let api_key = if raw.agent.api_key.trim().is_empty() {
            tracing::debug!("agent key is blank, using placeholder");
            default_agent_key()
        } else {
            raw.agent.api_key
        };

        Ok(Self {
            backend: BackendConfig::new(url, raw.backend.anon_key),
            agent: AgentConfig { api_key },
        })
    }
}

fn default_agent_key() -> String {
    PLACEHOLDER_AGENT_KEY.to_string()
}
