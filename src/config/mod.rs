//! Configuration loading and management
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! runnable configuration. A handful of environment variables override the
//! file; see [`AppConfig::apply_env`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the YAML file to load
pub const CONFIG_PATH_VAR: &str = "PRESTOCONFIG_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Outbound branch notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Display name of the sender
    pub from_name: String,

    /// Sender address
    pub from_address: String,

    /// Branch inboxes are `<branch>@<branch_domain>`
    pub branch_domain: String,

    /// Mail relay endpoint; messages are only logged when unset
    pub relay_url: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_name: "PrestoConfig".to_string(),
            from_address: "no-reply@prestoconfig.mi-shajib.com".to_string(),
            branch_domain: "prestoconfig.mi-shajib.com".to_string(),
            relay_url: None,
        }
    }
}

impl MailConfig {
    /// Sender in `Name <address>` form
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }
}

/// Submission client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service root the wizard submits to
    pub base_url: String,

    /// Bound on a single submission round trip
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as all defaults
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the file named by `PRESTOCONFIG_CONFIG` (if any), then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let lookup = |name: &str| std::env::var(name).ok();

        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_yaml_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup
    ///
    /// Recognised variables: `APP_HOST`, `APP_PORT`, `MAIL_FROM_NAME`,
    /// `MAIL_FROM_ADDRESS`, `MAIL_RELAY_URL`, `SUBMIT_BASE_URL`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("APP_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("APP_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("APP_PORT is not a valid port: {:?}", port))?;
        }
        if let Some(name) = lookup("MAIL_FROM_NAME") {
            self.mail.from_name = name;
        }
        if let Some(address) = lookup("MAIL_FROM_ADDRESS") {
            self.mail.from_address = address;
        }
        if let Some(url) = lookup("MAIL_RELAY_URL") {
            self.mail.relay_url = Some(url).filter(|url| !url.is_empty());
        }
        if let Some(url) = lookup("SUBMIT_BASE_URL") {
            self.client.base_url = url;
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address {}:{}",
                    self.server.host, self.server.port
                )
            })
    }
}
