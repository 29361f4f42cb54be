// rest_api/src/config.rs

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use graph_client::GraphSettings;

/// Represents the configuration for the REST API server itself.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// The full settings tree: the HTTP listener plus the external graph
/// database connection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub graph: GraphSettings,
}

/// Loads settings from `map_api.toml` in the working directory (optional)
/// overlaid with `MAP_API`-prefixed environment variables, e.g.
/// `MAP_API__GRAPH__URI` or `MAP_API__SERVER__PORT`. Missing keys fall
/// back to the defaults.
pub fn load_settings() -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name("map_api").required(false))
        .add_source(Environment::with_prefix("MAP_API").separator("__"))
        .build()
        .context("Failed to read configuration sources")?
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(settings)
}
