//! # Object and Subject References
//!
//! Parses the `type:id` / `type:id#relation` tokens every warrant command
//! takes, and renders them back the same way.
//!
//! ## Grammars
//!
//! Most commands need a fully specified object and use
//! [`ObjectGrammar::Strict`]. `object create` may omit the id so that the
//! service assigns one; it parses with [`ObjectGrammar::Creation`], which
//! additionally accepts a bare `type`.
//!
//! ## Limitation
//!
//! `:` separates type from id and `#` separates a subject from its
//! relation, so neither character can appear inside an id. Such tokens are
//! rejected, never reinterpreted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WarrantError;

const TYPE_SEPARATOR: char = ':';
const RELATION_SEPARATOR: char = '#';

/// Which object token shapes the calling command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectGrammar {
    /// Only `type:id`.
    Strict,
    /// `type:id` or a bare `type` (empty id).
    Creation,
}

/// A reference to an object: its type and, usually, its id.
///
/// The id is empty only when parsed with [`ObjectGrammar::Creation`] from a
/// bare type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    object_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    object_id: String,
}

impl ObjectRef {
    /// Parse an object token under the given grammar.
    ///
    /// # Errors
    ///
    /// Returns [`WarrantError::InvalidReference`] when the token carries a
    /// `#relation` suffix, has more than one `:`, has an empty type or id,
    /// or is a bare type under [`ObjectGrammar::Strict`].
    pub fn parse(token: &str, grammar: ObjectGrammar) -> Result<Self, WarrantError> {
        if token.contains(RELATION_SEPARATOR) {
            return Err(WarrantError::invalid_object(
                token,
                "object references cannot carry a '#relation' suffix",
            ));
        }
        let (object_type, object_id) =
            split_type_and_id(token).map_err(|reason| WarrantError::invalid_object(token, reason))?;

        match (object_id, grammar) {
            (Some(id), _) => Ok(Self {
                object_type: object_type.to_string(),
                object_id: id.to_string(),
            }),
            (None, ObjectGrammar::Creation) => Ok(Self {
                object_type: object_type.to_string(),
                object_id: String::new(),
            }),
            (None, ObjectGrammar::Strict) => Err(WarrantError::invalid_object(
                token,
                "expected 'type:id'",
            )),
        }
    }

    /// The object type, e.g. `role`.
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// The object id, empty for a bare-type creation reference.
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Whether an id was given.
    pub fn has_id(&self) -> bool {
        !self.object_id.is_empty()
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.object_id.is_empty() {
            write!(f, "{}", self.object_type)
        } else {
            write!(f, "{}{TYPE_SEPARATOR}{}", self.object_type, self.object_id)
        }
    }
}

impl FromStr for ObjectRef {
    type Err = WarrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, ObjectGrammar::Strict)
    }
}

/// A reference to a subject: an object, optionally narrowed to the set of
/// subjects holding `relation` on it (`group:eng#member`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    object_type: String,
    object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relation: Option<String>,
}

impl SubjectRef {
    /// Parse a subject token (`type:id` or `type:id#relation`).
    ///
    /// # Errors
    ///
    /// Returns [`WarrantError::InvalidReference`] for more than one `#`, an
    /// empty relation, or an object part that is not a strict `type:id`.
    pub fn parse(token: &str) -> Result<Self, WarrantError> {
        let (object_part, relation) = match token.split_once(RELATION_SEPARATOR) {
            Some((_, rest)) if rest.contains(RELATION_SEPARATOR) => {
                return Err(WarrantError::invalid_subject(
                    token,
                    "at most one '#' is allowed",
                ));
            }
            Some((_, "")) => {
                return Err(WarrantError::invalid_subject(
                    token,
                    "missing relation after '#'",
                ));
            }
            Some((object_part, relation)) => (object_part, Some(relation.to_string())),
            None => (token, None),
        };

        let (object_type, object_id) = split_type_and_id(object_part)
            .map_err(|reason| WarrantError::invalid_subject(token, reason))?;
        let object_id =
            object_id.ok_or_else(|| WarrantError::invalid_subject(token, "expected 'type:id'"))?;

        Ok(Self {
            object_type: object_type.to_string(),
            object_id: object_id.to_string(),
            relation,
        })
    }

    /// The subject's object type, e.g. `user`.
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// The subject's object id.
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// The subject-set relation, if any.
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{TYPE_SEPARATOR}{}", self.object_type, self.object_id)?;
        if let Some(relation) = &self.relation {
            write!(f, "{RELATION_SEPARATOR}{relation}")?;
        }
        Ok(())
    }
}

impl FromStr for SubjectRef {
    type Err = WarrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split `type[:id]` into its parts. `Ok((type, None))` means no colon.
fn split_type_and_id(token: &str) -> Result<(&str, Option<&str>), &'static str> {
    let (object_type, object_id) = match token.split_once(TYPE_SEPARATOR) {
        Some((_, rest)) if rest.contains(TYPE_SEPARATOR) => {
            return Err("expected exactly one ':' between type and id");
        }
        Some((object_type, object_id)) => (object_type, Some(object_id)),
        None => (token, None),
    };
    if object_type.is_empty() {
        return Err("missing type");
    }
    if object_id == Some("") {
        return Err("missing id after ':'");
    }
    Ok((object_type, object_id))
}
