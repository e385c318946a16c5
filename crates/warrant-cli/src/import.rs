//! # Import Subcommand
//!
//! `warrant import users <file.csv>` creates one user per CSV row. The
//! first row is a header; columns are `userId` then an optional `email`.
//! A failing row is reported and skipped, never aborting the import.
//! Calls are spaced [`ROW_DELAY`] apart.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use warrant_client::builtins::NewUser;
use warrant_client::WarrantClient;

/// Pause between row imports.
pub const ROW_DELAY: Duration = Duration::from_millis(50);

const USAGE: &str = "
This cmd can be used to bulk import entities from a csv file directly into Warrant.

1. Start by creating a csv file containing the entities you'd like to import (one entity per row). Each file must only contain 1 type of entity and all required attributes must be provided in column order (see columns below).
Please include the columns for your entityType as the first row (header) in your file:

entityType --> [columns] (optional attributes indicated by *)

users --> [userId, email*]

2. Once you have created your csv file, you can import it via this cmd:

warrant import [entityType] [filename]

For example:

warrant import users users.csv
";

/// Entity types that can be imported.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportEntity {
    Users,
}

/// Arguments for `warrant import`. With no arguments, prints usage.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Entity type to import.
    pub entity: Option<ImportEntity>,
    /// CSV file to read.
    pub file: Option<PathBuf>,
}

impl ImportArgs {
    /// Whether this invocation only asks for usage help.
    pub fn is_usage_request(&self) -> bool {
        self.entity.is_none() && self.file.is_none()
    }
}

/// Row counts reported at the end of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_processed: usize,
    pub created: usize,
    pub failed: usize,
}

/// Print the import usage text.
pub fn print_usage(out: &mut dyn Write) -> Result<u8> {
    write!(out, "{USAGE}")?;
    Ok(0)
}

/// Execute `warrant import`.
pub async fn run_import(
    args: &ImportArgs,
    client: &WarrantClient,
    delay: Duration,
    out: &mut dyn Write,
) -> Result<u8> {
    let (entity, file) = match (args.entity, &args.file) {
        (None, None) => return print_usage(out),
        (Some(entity), Some(file)) => (entity, file),
        _ => bail!("must provide 2 args for import: 'entityType' and 'filename'"),
    };

    writeln!(out, "Reading file...")?;
    let reader = std::fs::File::open(file)
        .with_context(|| format!("failed to open {}", file.display()))?;

    match entity {
        ImportEntity::Users => {
            let users = read_users(reader)
                .with_context(|| format!("failed to read {}", file.display()))?;
            import_users(client, &users, delay, out).await?;
        }
    }
    Ok(0)
}

/// Parse user rows after the header. Fields are trimmed; a blank email is
/// no email. Rows may have any number of columns.
pub fn read_users<R: Read>(reader: R) -> Result<Vec<NewUser>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut users = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let user_id = record.get(0).unwrap_or_default().to_string();
        let email = record
            .get(1)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        users.push(NewUser { user_id, email });
    }
    Ok(users)
}

/// Create each user in turn, reporting failures by row number (the first
/// data row is row 1). Rows with a blank id are sent as is.
pub async fn import_users(
    client: &WarrantClient,
    users: &[NewUser],
    delay: Duration,
    out: &mut dyn Write,
) -> Result<ImportSummary> {
    writeln!(out, "Creating users...")?;
    let mut summary = ImportSummary::default();

    for (i, user) in users.iter().enumerate() {
        let row = i + 1;
        match client.builtins().create_user(user).await {
            Ok(_) => summary.created += 1,
            Err(e) => {
                summary.failed += 1;
                tracing::debug!(row, user_id = %user.user_id, status = ?e.status(), "import row failed");
                writeln!(out, "Error processing row {row}: {:#}", anyhow::Error::from(e))?;
            }
        }
        summary.rows_processed += 1;

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    writeln!(
        out,
        "Import complete.\nRows processed: {}\nUsers created: {}\nRows failed: {}",
        summary.rows_processed, summary.created, summary.failed
    )?;
    Ok(summary)
}
