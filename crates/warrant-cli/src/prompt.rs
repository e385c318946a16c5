//! Interactive prompts for `init` and `env add`. Values already given on
//! the command line are used as-is and never prompted for.

use anyhow::{bail, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use warrant_client::config::parse_endpoint;
use warrant_client::DEFAULT_API_ENDPOINT;

use crate::config::Environment;

/// Environment values collected from flags, prompts, or both.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentInput {
    pub name: Option<String>,
    pub api_key: Option<String>,
    pub api_endpoint: Option<String>,
}

impl EnvironmentInput {
    /// Whether every value is present, so nothing will be prompted.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.api_key.is_some() && self.api_endpoint.is_some()
    }

    /// Fill in missing values interactively. A blank `default_name` means
    /// the name prompt has no default.
    pub fn resolve(self, default_name: &str) -> Result<(String, Environment)> {
        if !self.is_complete() {
            tracing::debug!("prompting for missing environment values");
        }
        let theme = ColorfulTheme::default();

        let name = match self.name {
            Some(name) => name,
            None => {
                let mut input = Input::with_theme(&theme).with_prompt("Environment name");
                if !default_name.is_empty() {
                    input = input.default(default_name.to_string());
                }
                input
                    .interact_text()
                    .context("failed to read environment name")?
            }
        };

        let api_key = match self.api_key {
            Some(key) => key,
            None => Password::with_theme(&theme)
                .with_prompt("API key")
                .interact()
                .context("failed to read API key")?,
        };
        if api_key.trim().is_empty() {
            bail!("API key cannot be empty");
        }

        let api_endpoint = match self.api_endpoint {
            Some(endpoint) => endpoint,
            None => Input::with_theme(&theme)
                .with_prompt("Warrant endpoint override (leave blank to use default)")
                .default(DEFAULT_API_ENDPOINT.to_string())
                .interact_text()
                .context("failed to read API endpoint")?,
        };
        if !api_endpoint.trim().is_empty() {
            parse_endpoint(api_endpoint.trim()).context("invalid API endpoint")?;
        }

        Ok((name, Environment::new(api_key, &api_endpoint)))
    }
}
