//! # CLI Configuration File
//!
//! Named environments, each an API key plus endpoint, persisted as
//! `~/.warrant.json`:
//!
//! ```json
//! {
//!     "activeEnvironment": "prod",
//!     "environments": {
//!         "prod": {
//!             "apiKey": "...",
//!             "apiEndpoint": "https://api.warrant.dev"
//!         }
//!     }
//! }
//! ```
//!
//! Files written by older releases hold a single flat `{key, apiEndpoint}`
//! pair. Those load as one environment named `default`, and are rewritten
//! in the current shape the next time the file is saved.
//!
//! ## Overrides
//!
//! `--key` beats `WARRANT_API_KEY` beats the active environment's key;
//! `WARRANT_API_ENDPOINT` beats the active environment's endpoint.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use warrant_client::{ClientConfig, DEFAULT_API_ENDPOINT};

use crate::printer;

/// File name of the config file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".warrant.json";

/// Environment variable overriding the API key.
pub const API_KEY_ENV: &str = "WARRANT_API_KEY";

/// Environment variable overriding the API endpoint.
pub const API_ENDPOINT_ENV: &str = "WARRANT_API_ENDPOINT";

/// Environment name given to a migrated flat config.
pub const LEGACY_ENVIRONMENT: &str = "default";

/// One named environment.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub api_endpoint: String,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("api_key", &"[REDACTED]")
            .field("api_endpoint", &self.api_endpoint)
            .finish()
    }
}

impl Environment {
    /// An environment on the default endpoint when `api_endpoint` is blank.
    pub fn new(api_key: impl Into<String>, api_endpoint: &str) -> Self {
        let api_endpoint = match api_endpoint.trim() {
            "" => DEFAULT_API_ENDPOINT.to_string(),
            other => other.to_string(),
        };
        Self {
            api_key: api_key.into().trim().to_string(),
            api_endpoint,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

/// Contents of `~/.warrant.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub active_environment: String,
    pub environments: BTreeMap<String, Environment>,
}

/// Every shape the file has had on disk.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfigFile {
    #[serde(default)]
    active_environment: String,
    #[serde(default)]
    environments: BTreeMap<String, Environment>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    api_endpoint: Option<String>,
}

impl From<RawConfigFile> for ConfigFile {
    fn from(raw: RawConfigFile) -> Self {
        let mut config = ConfigFile {
            active_environment: raw.active_environment,
            environments: raw.environments,
        };
        if config.environments.is_empty() {
            if let Some(key) = raw.key.filter(|k| !k.trim().is_empty()) {
                tracing::info!("migrating flat config to environment '{LEGACY_ENVIRONMENT}'");
                let endpoint = raw.api_endpoint.unwrap_or_default();
                config
                    .environments
                    .insert(LEGACY_ENVIRONMENT.to_string(), Environment::new(key, &endpoint));
                config.active_environment = LEGACY_ENVIRONMENT.to_string();
            }
        }
        config
    }
}

impl ConfigFile {
    /// Parse config file contents, migrating the legacy flat shape.
    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfigFile =
            serde_json::from_str(contents).context("config file is not valid JSON")?;
        Ok(raw.into())
    }

    /// Load the config file. A missing file is an empty configuration.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("failed to read config from {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, starting empty");
                Ok(Self::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("failed to open config file {}", path.display()))
            }
        }
    }

    /// Write the config file with four-space indentation.
    pub fn write(&self, path: &Path) -> Result<()> {
        let contents = printer::to_pretty_json(self)?;
        std::fs::write(path, contents + "\n")
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config file written");
        Ok(())
    }

    /// The active environment, validated.
    pub fn active(&self) -> Result<(&str, &Environment)> {
        if self.active_environment.is_empty() {
            bail!("no active environment configured. Run 'warrant init'");
        }
        if self.environments.is_empty() {
            bail!("no environments configured. Run 'warrant init'");
        }
        match self.environments.get(&self.active_environment) {
            Some(env) => Ok((&self.active_environment, env)),
            None => bail!("invalid active environment configured. Run 'warrant init'"),
        }
    }

    /// Add or replace an environment. The first environment added becomes
    /// active.
    pub fn add_environment(&mut self, name: &str, env: Environment) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("environment name cannot be empty");
        }
        if self.environments.insert(name.to_string(), env).is_some() {
            tracing::info!(environment = name, "replacing existing environment");
        }
        if self.active_environment.is_empty() {
            self.active_environment = name.to_string();
        }
        Ok(())
    }

    /// Remove an environment other than the active one.
    pub fn remove_environment(&mut self, name: &str) -> Result<()> {
        if name == self.active_environment {
            bail!("cannot remove active environment");
        }
        if self.environments.remove(name).is_none() {
            bail!("environment '{name}' does not exist");
        }
        Ok(())
    }

    /// Make an existing environment active.
    pub fn switch_environment(&mut self, name: &str) -> Result<()> {
        if !self.environments.contains_key(name) {
            bail!("environment '{name}' does not exist");
        }
        self.active_environment = name.to_string();
        Ok(())
    }

    /// Environment names, sorted.
    pub fn environment_names(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    /// Build the SDK configuration from the active environment and
    /// overrides. With a key override no environment is required.
    pub fn client_config(&self, overrides: &Overrides) -> Result<ClientConfig> {
        let (api_key, file_endpoint) = match &overrides.api_key {
            Some(key) => {
                let endpoint = self.active().ok().map(|(_, env)| env.api_endpoint.clone());
                (key.clone(), endpoint)
            }
            None => {
                let (name, env) = self.active()?;
                tracing::debug!(environment = name, "using active environment");
                (env.api_key.clone(), Some(env.api_endpoint.clone()))
            }
        };

        let endpoint = overrides
            .api_endpoint
            .clone()
            .or(file_endpoint)
            .unwrap_or_else(default_endpoint);

        ClientConfig::new(api_key, &endpoint).context("invalid client configuration")
    }
}

/// Values that take precedence over the config file.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub api_endpoint: Option<String>,
}

impl std::fmt::Debug for Overrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overrides")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_endpoint", &self.api_endpoint)
            .finish()
    }
}

impl Overrides {
    /// Combine the `--key` flag with the process environment.
    pub fn from_env(key_flag: Option<String>) -> Self {
        Self::resolve(key_flag, |var| std::env::var(var).ok())
    }

    fn resolve(key_flag: Option<String>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |v: String| if v.trim().is_empty() { None } else { Some(v) };
        Self {
            api_key: key_flag
                .and_then(non_blank)
                .or_else(|| lookup(API_KEY_ENV).and_then(non_blank)),
            api_endpoint: lookup(API_ENDPOINT_ENV).and_then(non_blank),
        }
    }
}

/// `~/.warrant.json`, or the explicit `--config` path.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_envs() -> ConfigFile {
        let mut config = ConfigFile::default();
        config
            .add_environment("prod", Environment::new("prod-key", ""))
            .unwrap();
        config
            .add_environment("test", Environment::new("test-key", "http://localhost:8000"))
            .unwrap();
        config
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, ConfigFile::default());
        assert!(!dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn write_then_load_preserves_environments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = two_envs();
        config.write(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\n    \"activeEnvironment\": \"prod\""));
        assert_eq!(ConfigFile::load(&path).unwrap(), config);
    }

    #[test]
    fn legacy_flat_config_migrates_to_default() {
        let config =
            ConfigFile::parse(r#"{"key": "legacy-key", "apiEndpoint": "https://api.warrant.dev"}"#)
                .unwrap();
        assert_eq!(config.active_environment, LEGACY_ENVIRONMENT);
        let (name, env) = config.active().unwrap();
        assert_eq!(name, "default");
        assert_eq!(env.api_key, "legacy-key");
        assert_eq!(env.api_endpoint, "https://api.warrant.dev");
    }

    #[test]
    fn legacy_config_without_endpoint_uses_default() {
        let config = ConfigFile::parse(r#"{"key": "k"}"#).unwrap();
        assert_eq!(config.active().unwrap().1.api_endpoint, DEFAULT_API_ENDPOINT);
    }

    #[test]
    fn legacy_migration_writes_new_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"key": "k", "apiEndpoint": ""}"#).unwrap();

        let mut config = ConfigFile::load(&path).unwrap();
        config
            .add_environment("staging", Environment::new("s", ""))
            .unwrap();
        config.write(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json.get("key").is_none());
        assert_eq!(json["activeEnvironment"], "default");
        assert_eq!(json["environments"]["default"]["apiKey"], "k");
        assert_eq!(json["environments"]["staging"]["apiKey"], "s");
    }

    #[test]
    fn active_reports_each_misconfiguration() {
        let err = ConfigFile::default().active().unwrap_err();
        assert_eq!(
            err.to_string(),
            "no active environment configured. Run 'warrant init'"
        );

        let config = ConfigFile {
            active_environment: "prod".into(),
            environments: BTreeMap::new(),
        };
        assert_eq!(
            config.active().unwrap_err().to_string(),
            "no environments configured. Run 'warrant init'"
        );

        let mut config = two_envs();
        config.active_environment = "gone".into();
        assert_eq!(
            config.active().unwrap_err().to_string(),
            "invalid active environment configured. Run 'warrant init'"
        );
    }

    #[test]
    fn first_added_environment_becomes_active() {
        let config = two_envs();
        assert_eq!(config.active_environment, "prod");
        assert_eq!(config.environment_names().collect::<Vec<_>>(), ["prod", "test"]);
    }

    #[test]
    fn add_rejects_blank_name() {
        let mut config = ConfigFile::default();
        assert!(config.add_environment("  ", Environment::new("k", "")).is_err());
    }

    #[test]
    fn cannot_remove_active_environment() {
        let mut config = two_envs();
        let err = config.remove_environment("prod").unwrap_err();
        assert_eq!(err.to_string(), "cannot remove active environment");
        assert!(config.environments.contains_key("prod"));
    }

    #[test]
    fn remove_unknown_environment_fails() {
        let mut config = two_envs();
        let err = config.remove_environment("qa").unwrap_err();
        assert_eq!(err.to_string(), "environment 'qa' does not exist");
    }

    #[test]
    fn remove_inactive_environment() {
        let mut config = two_envs();
        config.remove_environment("test").unwrap();
        assert_eq!(config.environments.len(), 1);
    }

    #[test]
    fn switch_requires_existing_environment() {
        let mut config = two_envs();
        assert!(config.switch_environment("qa").is_err());
        assert_eq!(config.active_environment, "prod");

        config.switch_environment("test").unwrap();
        assert_eq!(config.active().unwrap().1.api_key, "test-key");
    }

    #[test]
    fn client_config_from_active_environment() {
        let mut config = two_envs();
        config.switch_environment("test").unwrap();
        let client = config.client_config(&Overrides::default()).unwrap();
        assert_eq!(client.api_key.as_str(), "test-key");
        assert_eq!(client.api_endpoint.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn key_override_beats_file() {
        let config = two_envs();
        let overrides = Overrides {
            api_key: Some("flag-key".into()),
            api_endpoint: None,
        };
        let client = config.client_config(&overrides).unwrap();
        assert_eq!(client.api_key.as_str(), "flag-key");
        assert_eq!(client.api_endpoint.as_str(), "https://api.warrant.dev/");
    }

    #[test]
    fn key_override_works_without_config() {
        let overrides = Overrides {
            api_key: Some("k".into()),
            api_endpoint: Some("http://127.0.0.1:9000".into()),
        };
        let client = ConfigFile::default().client_config(&overrides).unwrap();
        assert_eq!(client.api_endpoint.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn no_override_and_no_config_fails() {
        assert!(ConfigFile::default()
            .client_config(&Overrides::default())
            .is_err());
    }

    #[test]
    fn flag_beats_environment_variable() {
        let lookup = |var: &str| match var {
            API_KEY_ENV => Some("env-key".to_string()),
            API_ENDPOINT_ENV => Some("http://env".to_string()),
            _ => None,
        };
        let overrides = Overrides::resolve(Some("flag-key".into()), lookup);
        assert_eq!(overrides.api_key.as_deref(), Some("flag-key"));
        assert_eq!(overrides.api_endpoint.as_deref(), Some("http://env"));

        let overrides = Overrides::resolve(None, lookup);
        assert_eq!(overrides.api_key.as_deref(), Some("env-key"));

        let overrides = Overrides::resolve(Some(" ".into()), |_| None);
        assert_eq!(overrides.api_key, None);
    }

    #[test]
    fn debug_redacts_keys() {
        let config = two_envs();
        let debug = format!("{config:?}");
        assert!(!debug.contains("prod-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
