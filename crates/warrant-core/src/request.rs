//! # Request Builders
//!
//! Combines parsed references, a relation, and the optional trailing
//! argument of `check`/`assign`/`remove` into the values the SDK sends.
//!
//! Pure transformations: no relation-name or policy validation happens
//! here, that is the authorization service's job. The only local checks
//! are the token grammar and the JSON shape of context/meta arguments.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::WarrantError;
use crate::reference::{ObjectGrammar, ObjectRef, SubjectRef};

/// Context passed to policy evaluation during a check.
pub type PolicyContext = Map<String, Value>;

/// Free-form metadata attached to an object.
pub type ObjectMeta = Map<String, Value>;

/// A single authorization check: does `subject` have `relation` on `object`?
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    #[serde(flatten)]
    pub object: ObjectRef,
    pub relation: String,
    pub subject: SubjectRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<PolicyContext>,
}

/// A warrant to create or delete: `subject` gets (or loses) `relation` on
/// `object`, optionally guarded by a policy expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRequest {
    #[serde(flatten)]
    pub object: ObjectRef,
    pub relation: String,
    pub subject: SubjectRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

/// Build a [`CheckRequest`] from command-line tokens.
///
/// # Errors
///
/// - [`WarrantError::InvalidReference`] if either reference is malformed.
/// - [`WarrantError::InvalidJson`] if `context_json` is given but is not a
///   JSON object.
pub fn build_check_request(
    subject: &str,
    relation: &str,
    object: &str,
    context_json: Option<&str>,
) -> Result<CheckRequest, WarrantError> {
    let subject = SubjectRef::parse(subject)?;
    let object = ObjectRef::parse(object, ObjectGrammar::Strict)?;
    let context = context_json.map(parse_context).transpose()?;

    Ok(CheckRequest {
        object,
        relation: relation.to_string(),
        subject,
        context,
    })
}

/// Build a [`MutationRequest`] from command-line tokens.
///
/// The policy string is opaque and passed through verbatim.
///
/// # Errors
///
/// Returns [`WarrantError::InvalidReference`] if either reference is malformed.
pub fn build_mutation_request(
    subject: &str,
    relation: &str,
    object: &str,
    policy: Option<&str>,
) -> Result<MutationRequest, WarrantError> {
    let subject = SubjectRef::parse(subject)?;
    let object = ObjectRef::parse(object, ObjectGrammar::Strict)?;

    Ok(MutationRequest {
        object,
        relation: relation.to_string(),
        subject,
        policy: policy.map(str::to_string),
    })
}

/// Parse a check context argument, e.g. `'{"clientIp": "1.2.3.4"}'`.
///
/// # Errors
///
/// Returns [`WarrantError::InvalidJson`] for malformed JSON or a non-object
/// document. A malformed context is never treated as empty.
pub fn parse_context(json: &str) -> Result<PolicyContext, WarrantError> {
    parse_json_object("context", json)
}

/// Parse an object meta argument, e.g. `'{"name": "Edit Users"}'`.
///
/// # Errors
///
/// Returns [`WarrantError::InvalidJson`] for malformed JSON or a non-object
/// document.
pub fn parse_object_meta(json: &str) -> Result<ObjectMeta, WarrantError> {
    parse_json_object("object meta", json)
}

fn parse_json_object(what: &'static str, json: &str) -> Result<Map<String, Value>, WarrantError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| WarrantError::invalid_json(what, &e))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(WarrantError::InvalidJson {
            what,
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl fmt::Display for CheckRequest {
    /// `subject relation object ['context']`, the form the CLI echoes back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.relation, self.object)?;
        if let Some(context) = self.context.as_ref().filter(|c| !c.is_empty()) {
            write!(f, " '{}'", Value::Object(context.clone()))?;
        }
        Ok(())
    }
}

impl fmt::Display for MutationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.relation, self.object)?;
        if let Some(policy) = self.policy.as_deref().filter(|p| !p.is_empty()) {
            write!(f, " '{policy}'")?;
        }
        Ok(())
    }
}
