//! # Init Subcommand
//!
//! First-run setup: collects an environment name, API key and endpoint,
//! stores them in the config file, and makes that environment active.
//! Existing environments are kept.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::config::ConfigFile;
use crate::prompt::EnvironmentInput;

/// Name suggested for the first environment.
pub const DEFAULT_ENVIRONMENT: &str = "prod";

/// Arguments for `warrant init`. Missing values are prompted for.
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Environment name.
    #[arg(long)]
    pub name: Option<String>,
    /// API key.
    #[arg(long)]
    pub api_key: Option<String>,
    /// API endpoint; blank for the default.
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// Execute `warrant init`.
pub fn run_init(args: &InitArgs, config_path: &Path, out: &mut dyn Write) -> Result<u8> {
    let input = EnvironmentInput {
        name: args.name.clone(),
        api_key: args.api_key.clone(),
        api_endpoint: args.endpoint.clone(),
    };
    let (name, env) = input.resolve(DEFAULT_ENVIRONMENT)?;

    let mut config = ConfigFile::load(config_path)?;
    config.add_environment(&name, env)?;
    config.switch_environment(name.trim())?;

    let verb = if config_path.exists() { "Updating" } else { "Creating" };
    writeln!(out, "{verb} {}", config_path.display())?;
    config.write(config_path)?;
    writeln!(out, "Setup complete.")?;
    Ok(0)
}
