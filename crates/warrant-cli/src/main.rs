//! # warrant CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! API commands run on a current-thread tokio runtime, one request at a
//! time.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use warrant_cli::builtin::{run_create, run_delete, run_list, ListArgs, ResourceArgs};
use warrant_cli::check::{run_assert, run_check, AssertArgs, CheckArgs};
use warrant_cli::config::{self, Overrides};
use warrant_cli::env::{run_env, EnvArgs};
use warrant_cli::import::{self, run_import, ImportArgs};
use warrant_cli::init::{run_init, InitArgs};
use warrant_cli::object::{run_object, ObjectArgs};
use warrant_cli::objecttype::{run_objecttype, ObjectTypeArgs};
use warrant_cli::query::{run_query, QueryArgs};
use warrant_cli::warrant::{run_assign, run_remove, WarrantArgs};

/// Warrant CLI
///
/// Interact with Warrant from the command line: run authorization checks,
/// manage warrants, objects and object types, and switch between
/// environments.
#[derive(Parser, Debug)]
#[command(name = "warrant", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the config file (default: ~/.warrant.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API key to use instead of the active environment's.
    #[arg(short = 'k', long = "key", global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check if a subject has a given relation with an object.
    Check(CheckArgs),

    /// Assert whether a check is true or false; exits 1 on mismatch.
    Assert(AssertArgs),

    /// Assign a subject to an object with a relation and optional policy.
    Assign(WarrantArgs),

    /// Remove a warrant, or a built-in association.
    Remove(WarrantArgs),

    /// Create a built-in resource by type and id.
    Create(ResourceArgs),

    /// Delete a built-in resource by type and id.
    Delete(ResourceArgs),

    /// List resources of a built-in type.
    List(ListArgs),

    /// Operate on objects (create, get, update, delete).
    Object(ObjectArgs),

    /// Operate on object type definitions (list, apply).
    Objecttype(ObjectTypeArgs),

    /// Run a Warrant query.
    Query(QueryArgs),

    /// Import entities from a CSV file.
    Import(ImportArgs),

    /// List, add, remove, or switch environments.
    Env(EnvArgs),

    /// Initialize the CLI for use.
    Init(InitArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("warrant CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = runtime
        .block_on(run(cli, &mut out))
        .and_then(|code| out.flush().map(|()| code).context("failed to write output"));

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli, out: &mut dyn Write) -> Result<u8> {
    let config_path = config::resolve_path(cli.config.as_deref())?;
    tracing::debug!(path = %config_path.display(), "resolved config file");

    // Local-only commands never build a client, so they work without a key.
    let connect = || warrant_cli::connect(&config_path, &Overrides::from_env(cli.key.clone()));

    match cli.command {
        Commands::Env(args) => run_env(&args, &config_path, out),
        Commands::Init(args) => run_init(&args, &config_path, out),
        Commands::Check(args) => run_check(&args, &connect()?, out).await,
        Commands::Assert(args) => run_assert(&args, &connect()?, out).await,
        Commands::Assign(args) => run_assign(&args, &connect()?, out).await,
        Commands::Remove(args) => run_remove(&args, &connect()?, out).await,
        Commands::Create(args) => run_create(&args, &connect()?, out).await,
        Commands::Delete(args) => run_delete(&args, &connect()?, out).await,
        Commands::List(args) => run_list(&args, &connect()?, out).await,
        Commands::Object(args) => run_object(&args, &connect()?, out).await,
        Commands::Objecttype(args) => {
            let mut stdin = std::io::stdin().lock();
            run_objecttype(&args, &connect()?, &mut stdin, out).await
        }
        Commands::Query(args) => run_query(&args, &connect()?, out).await,
        Commands::Import(args) if args.is_usage_request() => import::print_usage(out),
        Commands::Import(args) => run_import(&args, &connect()?, import::ROW_DELAY, out).await,
    }
}
