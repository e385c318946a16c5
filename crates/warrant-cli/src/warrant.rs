//! # Assign and Remove Subcommands
//!
//! With three or four arguments, `assign`/`remove` create or delete the
//! warrant `<subject> <relation> <object> [policy]`. With two, they use the
//! built-in association shortcuts, e.g. `warrant assign role:admin user:u1`.

use std::io::Write;

use anyhow::{bail, Result};
use clap::Args;
use warrant_client::WarrantClient;
use warrant_core::{build_mutation_request, Association, ObjectRef};

/// Arguments shared by `warrant assign` and `warrant remove`.
#[derive(Args, Debug)]
pub struct WarrantArgs {
    /// `<subject> <relation> <object> [policy]`, or `<subject> <object>`
    /// for the built-in shortcuts.
    #[arg(required = true, num_args = 2..=4, value_name = "ARGS")]
    pub args: Vec<String>,
}

enum Target<'a> {
    Warrant {
        subject: &'a str,
        relation: &'a str,
        object: &'a str,
        policy: Option<&'a str>,
    },
    Shortcut {
        subject: &'a str,
        object: &'a str,
    },
}

impl WarrantArgs {
    fn target(&self) -> Result<Target<'_>> {
        Ok(match self.args.as_slice() {
            [subject, object] => Target::Shortcut { subject, object },
            [subject, relation, object] => Target::Warrant {
                subject,
                relation,
                object,
                policy: None,
            },
            [subject, relation, object, policy] => Target::Warrant {
                subject,
                relation,
                object,
                policy: Some(policy.as_str()),
            },
            other => bail!("expected 2 to 4 arguments, got {}", other.len()),
        })
    }
}

/// Execute `warrant assign`.
pub async fn run_assign(args: &WarrantArgs, client: &WarrantClient, out: &mut dyn Write) -> Result<u8> {
    match args.target()? {
        Target::Warrant {
            subject,
            relation,
            object,
            policy,
        } => {
            let req = build_mutation_request(subject, relation, object, policy)?;
            client.warrants().create(&req).await?;
            writeln!(out, "Created warrant {req}")?;
        }
        Target::Shortcut { subject, object } => {
            let (assoc, subject, object) = shortcut(subject, object)?;
            client
                .builtins()
                .assign(assoc, subject.object_id(), object.object_id())
                .await?;
            writeln!(out, "Assigned {subject} to {object}")?;
        }
    }
    Ok(0)
}

/// Execute `warrant remove`.
pub async fn run_remove(args: &WarrantArgs, client: &WarrantClient, out: &mut dyn Write) -> Result<u8> {
    match args.target()? {
        Target::Warrant {
            subject,
            relation,
            object,
            policy,
        } => {
            let req = build_mutation_request(subject, relation, object, policy)?;
            client.warrants().delete(&req).await?;
            writeln!(out, "Deleted warrant {req}")?;
        }
        Target::Shortcut { subject, object } => {
            let (assoc, subject, object) = shortcut(subject, object)?;
            client
                .builtins()
                .remove(assoc, subject.object_id(), object.object_id())
                .await?;
            writeln!(out, "Removed {subject} from {object}")?;
        }
    }
    Ok(0)
}

fn shortcut(subject: &str, object: &str) -> Result<(Association, ObjectRef, ObjectRef)> {
    let subject: ObjectRef = subject.parse()?;
    let object: ObjectRef = object.parse()?;
    let assoc = Association::for_refs(&subject, &object)?;
    Ok((assoc, subject, object))
}
