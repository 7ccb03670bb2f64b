// src/core/config_manager.rs
//! Configuration loading: optional YAML profile file, then environment
//! overrides. CLI flags are applied on top by the binary.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::service_client::DEFAULT_TIMEOUT_SECS;

pub const DEFAULT_CONFIG_FILE: &str = "jobmatch.yaml";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LOG_FILTER: &str = "jobmatch=info,rocket::server=OFF";

const LOCAL_PROFILE: &str = "local";
const PRODUCTION_PROFILE: &str = "production";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    /// Name of the profile the settings came from.
    pub profile: String,
    pub service: ServiceConfig,
    pub web: WebConfig,
    pub logging: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub api_base_url: String,
    /// 0 disables the request deadline.
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub address: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub filter: String,
}

/// One profile of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ProfileConfig {
    service: Option<ServiceConfig>,
    web: Option<WebConfig>,
    logging: Option<LogConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: ProfileConfig,
    production: ProfileConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::from([127, 0, 0, 1]),
            port: 5173,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            profile: LOCAL_PROFILE.to_string(),
            service: ServiceConfig::default(),
            web: WebConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        let config_path = std::env::var("JOBMATCH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path, &environment)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBMATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| LOCAL_PROFILE.to_string())
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let (name, profile) = match environment {
            PRODUCTION_PROFILE => (PRODUCTION_PROFILE, file.production),
            _ => (LOCAL_PROFILE, file.local),
        };

        Ok(Self {
            profile: name.to_string(),
            service: profile.service.unwrap_or_default(),
            web: profile.web.unwrap_or_default(),
            logging: profile.logging.unwrap_or_default(),
        })
    }

    /// Apply `JOBMATCH_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("JOBMATCH_API_URL") {
            self.service.api_base_url = url;
        }
        if let Some(timeout) = lookup("JOBMATCH_TIMEOUT_SECS") {
            self.service.timeout_seconds = timeout
                .parse()
                .context("JOBMATCH_TIMEOUT_SECS must be a whole number of seconds")?;
        }
        if let Some(port) = lookup("JOBMATCH_PORT") {
            self.web.port = port
                .parse()
                .context("JOBMATCH_PORT must be a valid port number")?;
        }
        if let Some(address) = lookup("JOBMATCH_ADDRESS") {
            self.web.address = address
                .parse()
                .context("JOBMATCH_ADDRESS must be an IP address")?;
        }
        if let Some(file) = lookup("JOBMATCH_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
        Ok(())
    }
}
