//! Configuration management
//!
//! Configuration merges, in order: defaults, an optional YAML file, then
//! `IDP_GATEWAY_`-prefixed environment variables (`__` separates nesting,
//! e.g. `IDP_GATEWAY_PROVIDER__REALM`). A `.env` file in the working
//! directory is loaded into the process environment first, so secrets can
//! stay out of both the YAML file and the shell profile.

use std::{env, path::Path, time::Duration};

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Identity-provider configuration
    pub provider: ProviderConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Identity-provider connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the identity provider
    pub base_url: String,

    /// Realm (tenant) the gateway operates in
    pub realm: String,

    /// Client id used for the client-credentials grant
    pub admin_client_id: String,

    /// Client secret for the grant. Supports `env:VAR_NAME` indirection so
    /// the literal never has to appear in a config file.
    pub admin_client_secret: String,

    /// Timeout applied to every upstream request
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            realm: "master".to_string(),
            admin_client_id: String::new(),
            admin_client_secret: "env:IDP_GATEWAY_CLIENT_SECRET".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ProviderConfig {
    /// Resolve the client secret (expand `env:VAR_NAME` references)
    #[must_use]
    pub fn resolve_client_secret(&self) -> String {
        if let Some(var_name) = self.admin_client_secret.strip_prefix("env:") {
            env::var(var_name).unwrap_or_default()
        } else {
            self.admin_client_secret.clone()
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist, cannot be parsed,
    /// or the provider base URL is not a valid URL.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Make .env values visible to figment and `env:` expansion
        let _ = dotenvy::dotenv();

        let mut figment = Figment::new();

        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        figment = figment.merge(Env::prefixed("IDP_GATEWAY_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.provider.base_url).map_err(|e| {
            Error::Config(format!(
                "Invalid provider base URL '{}': {e}",
                self.provider.base_url
            ))
        })?;
        Ok(())
    }
}
