//! # Check and Assert Subcommands
//!
//! `warrant check <subject> <relation> <object> [context]` prints
//!
//! ```text
//! ✔ true user:56 member role:admin
//! ✖ false user:2 editor document:xyz
//! ```
//!
//! In assert mode (`check --assert <bool>` or `warrant assert <bool> ...`)
//! the line reads `✔ assert true ...` on a match; a mismatch prints
//! `✖ assert true ...` and exits 1.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use warrant_client::{RequestOptions, WarrantClient};
use warrant_core::{build_check_request, CheckRequest};

use crate::printer::{self, CHECKMARK, CROSS};

/// Arguments for `warrant check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Subject as `type:id` or `type:id#relation`.
    pub subject: String,
    /// Relation to check.
    pub relation: String,
    /// Object as `type:id`.
    pub object: String,
    /// Optional policy context as a JSON object.
    pub context: Option<String>,
    /// Expected result. Exits 1 when the check disagrees.
    #[arg(short, long, value_parser = crate::parse_bool)]
    pub assert: Option<bool>,
    /// Print the decision path returned by the service.
    #[arg(short, long)]
    pub debug: bool,
    /// Warrant-Token header value to send with the check.
    #[arg(short = 'w', long)]
    pub warrant_token: Option<String>,
}

/// Arguments for `warrant assert`.
#[derive(Args, Debug)]
pub struct AssertArgs {
    /// Expected result: true or false.
    #[arg(value_parser = crate::parse_bool, action = clap::ArgAction::Set)]
    pub expected: bool,
    /// Subject as `type:id` or `type:id#relation`.
    pub subject: String,
    /// Relation to check.
    pub relation: String,
    /// Object as `type:id`.
    pub object: String,
    /// Optional policy context as a JSON object.
    pub context: Option<String>,
}

/// Execute `warrant check`.
pub async fn run_check(args: &CheckArgs, client: &WarrantClient, out: &mut dyn Write) -> Result<u8> {
    let req = build_check_request(
        &args.subject,
        &args.relation,
        &args.object,
        args.context.as_deref(),
    )?;
    let opts = RequestOptions::with_warrant_token(args.warrant_token.as_deref());
    check_and_report(client, &req, args.assert, args.debug, &opts, out).await
}

/// Execute `warrant assert`.
pub async fn run_assert(
    args: &AssertArgs,
    client: &WarrantClient,
    out: &mut dyn Write,
) -> Result<u8> {
    let req = build_check_request(
        &args.subject,
        &args.relation,
        &args.object,
        args.context.as_deref(),
    )?;
    check_and_report(
        client,
        &req,
        Some(args.expected),
        false,
        &RequestOptions::default(),
        out,
    )
    .await
}

async fn check_and_report(
    client: &WarrantClient,
    req: &CheckRequest,
    expected: Option<bool>,
    debug: bool,
    opts: &RequestOptions,
    out: &mut dyn Write,
) -> Result<u8> {
    let result = client.checks().check(req, debug, opts).await?;
    let authorized = result.is_authorized();

    let code = match expected {
        Some(expected) if expected == authorized => {
            writeln!(out, "{CHECKMARK} assert {expected} {req}")?;
            0
        }
        Some(expected) => {
            writeln!(out, "{CROSS} assert {expected} {req}")?;
            1
        }
        None if authorized => {
            writeln!(out, "{CHECKMARK} true {req}")?;
            0
        }
        None => {
            writeln!(out, "{CROSS} false {req}")?;
            0
        }
    };

    if debug {
        match &result.decision_path {
            Some(path) => printer::print_json(out, path)?,
            None => tracing::warn!("debug check returned no decision path"),
        }
    }

    Ok(code)
}
