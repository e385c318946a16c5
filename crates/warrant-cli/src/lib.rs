//! # warrant-cli — The `warrant` Command-Line Client
//!
//! Parses shell arguments into `warrant-core` request values, sends them
//! through `warrant-client`, and prints the results.
//!
//! ## Subcommands
//!
//! - `warrant check` / `warrant assert`: Authorization checks.
//! - `warrant assign` / `warrant remove`: Create or delete warrants, or
//!   use the built-in association shortcuts.
//! - `warrant create` / `warrant delete` / `warrant list`: Built-in
//!   resources (users, tenants, roles, permissions, pricing tiers, features).
//! - `warrant object`: Object CRUD, including meta.
//! - `warrant objecttype`: List or apply object type definitions.
//! - `warrant query`: Run a query.
//! - `warrant import`: Bulk import users from CSV.
//! - `warrant env` / `warrant init`: Manage `~/.warrant.json`.
//!
//! ```bash
//! warrant check user:56 member role:admin
//! warrant assign user:56 member role:admin 'domain == warrant.dev'
//! warrant object create permission:edit-users '{"name": "Edit Users"}'
//! ```
//!
//! Handlers return the process exit code and write to the `out` writer
//! they are given, so tests can capture output.

pub mod builtin;
pub mod check;
pub mod config;
pub mod env;
pub mod import;
pub mod init;
pub mod object;
pub mod objecttype;
pub mod printer;
pub mod prompt;
pub mod query;
pub mod warrant;

use std::path::Path;

use anyhow::{Context, Result};
use warrant_client::WarrantClient;

use crate::config::{ConfigFile, Overrides};

/// Load the config file and build an API client for the active
/// environment, applying overrides.
pub fn connect(config_path: &Path, overrides: &Overrides) -> Result<WarrantClient> {
    let config = ConfigFile::load(config_path)?;
    let client_config = config.client_config(overrides)?;
    tracing::debug!(config = ?client_config, "connecting");
    WarrantClient::new(&client_config).context("failed to create API client")
}

/// Parse a boolean the way `assert` arguments are written: `true`, `false`,
/// `1`, `0`, `t`, `f`, in any case.
pub fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(format!("invalid boolean '{s}' (expected true or false)")),
    }
}
