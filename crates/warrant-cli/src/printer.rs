//! Terminal output helpers shared by the subcommands.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// Marker printed before a passing check or assertion.
pub const CHECKMARK: &str = if cfg!(windows) { "√" } else { "✔" };

/// Marker printed before a failing check or assertion.
pub const CROSS: &str = if cfg!(windows) { "×" } else { "✖" };

/// Serialize `value` as JSON indented by four spaces, the layout used for
/// both command output and the config file.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .context("failed to serialize JSON output")?;
    String::from_utf8(buf).context("serialized JSON was not UTF-8")
}

/// Print `value` as four-space-indented JSON followed by a newline.
pub fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    writeln!(out, "{}", to_pretty_json(value)?)?;
    Ok(())
}
