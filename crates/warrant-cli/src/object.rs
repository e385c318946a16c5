//! # Object Subcommand
//!
//! - `create <type[:id]> [meta]`: Create an object; the service assigns
//!   an id when none is given.
//! - `get <type:id>`: Show an object and its meta.
//! - `update <type:id> <meta>`: Replace an object's meta.
//! - `delete <type:id>`: Delete an object.

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use warrant_client::objects::Object;
use warrant_client::{RequestOptions, WarrantClient};
use warrant_core::{parse_object_meta, ObjectGrammar, ObjectRef};

use crate::printer;

/// Arguments for `warrant object`.
#[derive(Args, Debug)]
pub struct ObjectArgs {
    #[command(subcommand)]
    pub command: ObjectCommand,
}

/// Object subcommands.
#[derive(Subcommand, Debug)]
pub enum ObjectCommand {
    /// Create an object with an optional id and optional meta.
    Create {
        /// Object as `type` or `type:id`.
        object: String,
        /// Meta as a JSON object.
        meta: Option<String>,
    },
    /// Get an object by `type:id`.
    Get {
        object: String,
        /// Warrant-Token header value.
        #[arg(short = 'w', long)]
        warrant_token: Option<String>,
    },
    /// Replace an object's meta. Type and id cannot change.
    Update {
        object: String,
        /// Meta as a JSON object.
        meta: String,
    },
    /// Delete an object, meta included.
    Delete { object: String },
}

/// Execute the object subcommand.
pub async fn run_object(args: &ObjectArgs, client: &WarrantClient, out: &mut dyn Write) -> Result<u8> {
    match &args.command {
        ObjectCommand::Create { object, meta } => {
            let object = ObjectRef::parse(object, ObjectGrammar::Creation)?;
            if !object.has_id() {
                tracing::debug!(object_type = object.object_type(), "no id given, service assigns one");
            }
            let meta = meta.as_deref().map(parse_object_meta).transpose()?;
            let created = client.objects().create(&object, meta.as_ref()).await?;
            print_object(out, "created ", &created)?;
        }
        ObjectCommand::Get {
            object,
            warrant_token,
        } => {
            let object: ObjectRef = object.parse()?;
            let opts = RequestOptions::with_warrant_token(warrant_token.as_deref());
            let found = client.objects().get(&object, &opts).await?;
            print_object(out, "", &found)?;
        }
        ObjectCommand::Update { object, meta } => {
            let object: ObjectRef = object.parse()?;
            let meta = parse_object_meta(meta)?;
            let updated = client.objects().update(&object, &meta).await?;
            print_object(out, "updated ", &updated)?;
        }
        ObjectCommand::Delete { object } => {
            let object: ObjectRef = object.parse()?;
            client.objects().delete(&object).await?;
            writeln!(out, "deleted {object}")?;
        }
    }
    Ok(0)
}

fn print_object(out: &mut dyn Write, verb: &str, object: &Object) -> Result<()> {
    writeln!(out, "{verb}{}:{}", object.object_type, object.object_id)?;
    if let Some(meta) = object.meta() {
        printer::print_json(out, meta)?;
    }
    Ok(())
}
