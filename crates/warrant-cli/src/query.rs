//! # Query Subcommand
//!
//! `warrant query '<query>'` runs a query and prints one page of results
//! as JSON. Use `--nextCursor`/`--prevCursor` from the output to page.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use warrant_client::{QueryParams, RequestOptions, WarrantClient};

use crate::printer;

/// Arguments for `warrant query`.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Query string, e.g. `select explicit *`.
    pub query: String,
    /// Maximum results per page.
    #[arg(long)]
    pub limit: Option<u32>,
    /// Cursor of the next page.
    #[arg(long = "nextCursor")]
    pub next_cursor: Option<String>,
    /// Cursor of the previous page.
    #[arg(long = "prevCursor")]
    pub prev_cursor: Option<String>,
    /// Warrant-Token header value.
    #[arg(short = 'w', long)]
    pub warrant_token: Option<String>,
}

impl QueryArgs {
    fn params(&self) -> QueryParams {
        QueryParams {
            limit: self.limit,
            next_cursor: self.next_cursor.clone(),
            prev_cursor: self.prev_cursor.clone(),
            ..QueryParams::new(self.query.clone())
        }
    }
}

/// Execute `warrant query`.
pub async fn run_query(args: &QueryArgs, client: &WarrantClient, out: &mut dyn Write) -> Result<u8> {
    let opts = RequestOptions::with_warrant_token(args.warrant_token.as_deref());
    let page = client.query().query(&args.params(), &opts).await?;
    printer::print_json(out, &page)?;
    Ok(0)
}
