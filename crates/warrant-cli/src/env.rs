//! # Env Subcommand
//!
//! - `env`: Print the active environment.
//! - `env --list`: List all environments, marking the active one with `*`.
//! - `env add [name]`: Add an environment (prompts for missing values).
//! - `env remove <name>`: Remove an inactive environment.
//! - `env switch <name>`: Make an environment active.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ConfigFile;
use crate::prompt::EnvironmentInput;

/// Arguments for `warrant env`.
#[derive(Args, Debug)]
pub struct EnvArgs {
    /// List all configured environments.
    #[arg(short, long)]
    pub list: bool,

    #[command(subcommand)]
    pub command: Option<EnvCommand>,
}

/// Env subcommands.
#[derive(Subcommand, Debug)]
pub enum EnvCommand {
    /// Add a new environment, including its API key and endpoint.
    Add {
        /// Environment name.
        name: Option<String>,
        /// API key for the environment.
        #[arg(long)]
        api_key: Option<String>,
        /// API endpoint; blank for the default.
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Remove an environment that is not active.
    Remove { name: String },
    /// Switch to an existing environment.
    Switch { name: String },
}

/// Execute the env subcommand against the config file at `config_path`.
pub fn run_env(args: &EnvArgs, config_path: &Path, out: &mut dyn Write) -> Result<u8> {
    let mut config = ConfigFile::load(config_path)?;

    match &args.command {
        None => {
            let (active, _) = config.active()?;
            if args.list && config.environments.len() > 1 {
                for name in config.environment_names() {
                    let marker = if name == active { "*" } else { " " };
                    writeln!(out, "{marker} {name}")?;
                }
            } else {
                writeln!(out, "{active}")?;
            }
        }
        Some(EnvCommand::Add {
            name,
            api_key,
            endpoint,
        }) => {
            let input = EnvironmentInput {
                name: name.clone(),
                api_key: api_key.clone(),
                api_endpoint: endpoint.clone(),
            };
            let (name, env) = input.resolve("")?;
            config.add_environment(&name, env)?;
            config.write(config_path)?;
            writeln!(out, "Added environment '{}'", name.trim())?;
        }
        Some(EnvCommand::Remove { name }) => {
            config.active()?;
            config.remove_environment(name)?;
            config.write(config_path)?;
            writeln!(out, "Removed environment '{name}'")?;
        }
        Some(EnvCommand::Switch { name }) => {
            config.switch_environment(name)?;
            config.write(config_path)?;
            writeln!(out, "Switched to environment '{name}'")?;
        }
    }
    Ok(0)
}
