//! # Built-in Resource Subcommands
//!
//! `create <type> <id>`, `delete <type> <id>` and `list <collection>` for
//! users, tenants, roles, permissions, pricing tiers and features.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use warrant_client::WarrantClient;
use warrant_core::BuiltinType;

/// First page only.
pub const LIST_PAGE: u32 = 1;

/// Page size for `list`.
pub const LIST_LIMIT: u32 = 50;

/// Arguments for `warrant create` and `warrant delete`.
#[derive(Args, Debug)]
pub struct ResourceArgs {
    /// One of: user, tenant, role, permission, pricing-tier, feature.
    pub kind: String,
    /// Resource id.
    pub id: String,
}

/// Arguments for `warrant list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// One of: users, tenants, roles, permissions, pricing-tiers, features.
    pub collection: String,
}

/// Execute `warrant create`.
pub async fn run_create(args: &ResourceArgs, client: &WarrantClient, out: &mut dyn Write) -> Result<u8> {
    let kind: BuiltinType = args.kind.parse()?;
    client.builtins().create(kind, &args.id).await?;
    writeln!(out, "Created {kind}:{}", args.id)?;
    Ok(0)
}

/// Execute `warrant delete`.
pub async fn run_delete(args: &ResourceArgs, client: &WarrantClient, out: &mut dyn Write) -> Result<u8> {
    let kind: BuiltinType = args.kind.parse()?;
    client.builtins().delete(kind, &args.id).await?;
    writeln!(out, "Deleted {kind}:{}", args.id)?;
    Ok(0)
}

/// Execute `warrant list`: one id per line.
pub async fn run_list(args: &ListArgs, client: &WarrantClient, out: &mut dyn Write) -> Result<u8> {
    let kind = BuiltinType::from_collection(&args.collection)?;
    let items = client.builtins().list(kind, LIST_PAGE, LIST_LIMIT).await?;
    for item in &items {
        match item.get(kind.id_field()).and_then(|id| id.as_str()) {
            Some(id) => writeln!(out, "{id}")?,
            None => tracing::warn!(field = kind.id_field(), "list item has no id"),
        }
    }
    Ok(0)
}
