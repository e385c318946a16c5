//! # Object Type Subcommand
//!
//! - `list`: Print every object type in the active environment, following
//!   pagination to the end.
//! - `apply`: Replace the environment's object types with a JSON array
//!   read from `-f <file>` or stdin.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;
use warrant_client::{RequestOptions, WarrantClient};
use warrant_core::WarrantError;

use crate::printer;

/// Arguments for `warrant objecttype`.
#[derive(Args, Debug)]
pub struct ObjectTypeArgs {
    #[command(subcommand)]
    pub command: ObjectTypeCommand,
}

/// Object type subcommands.
#[derive(Subcommand, Debug)]
pub enum ObjectTypeCommand {
    /// List all object types.
    List {
        /// Warrant-Token header value.
        #[arg(short = 'w', long)]
        warrant_token: Option<String>,
    },
    /// Apply object type definitions from a file or stdin.
    Apply {
        /// File containing a JSON array of object types.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Execute the objecttype subcommand. `stdin` is read by `apply` when no
/// file is given.
pub async fn run_objecttype(
    args: &ObjectTypeArgs,
    client: &WarrantClient,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<u8> {
    match &args.command {
        ObjectTypeCommand::List { warrant_token } => {
            let opts = RequestOptions::with_warrant_token(warrant_token.as_deref());
            let types = client.object_types().list_all(&opts).await?;
            tracing::info!(count = types.len(), "fetched object types");
            printer::print_json(out, &types)?;
        }
        ObjectTypeCommand::Apply { file } => {
            let types = read_types(file.as_deref(), stdin)?;
            client.object_types().batch_update(&types).await?;
            writeln!(out, "objecttypes updated")?;
        }
    }
    Ok(0)
}

/// Read and validate an object type document.
pub fn read_types(file: Option<&Path>, stdin: &mut dyn Read) -> Result<Vec<Value>> {
    let contents = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read object types from stdin")?;
            buf
        }
    };
    Ok(parse_types(&contents)?)
}

fn parse_types(contents: &str) -> Result<Vec<Value>, WarrantError> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| WarrantError::invalid_json("object types", &e))?;
    match value {
        Value::Array(types) => Ok(types),
        _ => Err(WarrantError::InvalidJson {
            what: "object types",
            reason: "expected a JSON array".to_string(),
        }),
    }
}
