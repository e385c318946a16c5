//! # Error Taxonomy
//!
//! Every failure the core can produce. All of them are terminal for the
//! command that triggered them: nothing here is retried or defaulted.

use thiserror::Error;

/// Errors produced while turning command-line tokens into requests.
#[derive(Error, Debug)]
pub enum WarrantError {
    /// A `type[:id][#relation]` token has the wrong shape.
    #[error("invalid {kind} \"{token}\": {reason}")]
    InvalidReference {
        /// `object` or `subject`, matching the parser that rejected it.
        kind: &'static str,
        /// The token exactly as given on the command line.
        token: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A JSON argument (check context, object meta, object types) could not
    /// be parsed or had the wrong top-level shape.
    #[error("invalid {what}: {reason}")]
    InvalidJson {
        /// Which argument was being parsed.
        what: &'static str,
        /// Parser message or shape complaint.
        reason: String,
    },

    /// No built-in shortcut exists for this combination of types.
    #[error("unsupported operation for {subject_type} and {object_type}")]
    UnsupportedOperation {
        /// Type of the thing being assigned or removed.
        subject_type: String,
        /// Type of the thing it is assigned to or removed from.
        object_type: String,
    },

    /// Unknown built-in resource type.
    #[error("unsupported type \"{0}\" (expected one of: user, tenant, role, permission, pricing-tier, feature)")]
    UnsupportedType(String),
}

impl WarrantError {
    pub(crate) fn invalid_object(token: &str, reason: &'static str) -> Self {
        Self::InvalidReference {
            kind: "object",
            token: token.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_subject(token: &str, reason: &'static str) -> Self {
        Self::InvalidReference {
            kind: "subject",
            token: token.to_string(),
            reason,
        }
    }

    /// Wrap a `serde_json` failure for the named argument.
    pub fn invalid_json(what: &'static str, err: &serde_json::Error) -> Self {
        Self::InvalidJson {
            what,
            reason: err.to_string(),
        }
    }
}
