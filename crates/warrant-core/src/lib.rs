//! # warrant-core — Reference Grammar and Request Builders
//!
//! The only part of the Warrant CLI with real invariants. Turns shell tokens
//! into typed request values that the SDK (`warrant-client`) sends as-is.
//!
//! ## Token Grammar
//!
//! ```text
//! object  := type ":" id          (strict)
//!          | type                 (creation contexts only)
//! subject := type ":" id [ "#" relation ]
//! ```
//!
//! `type`, `id` and `relation` are non-empty. An id can never contain `:`
//! or `#`; tokens that would need them are rejected rather than guessed at.
//!
//! ## Modules
//!
//! - [`reference`]: [`ObjectRef`] / [`SubjectRef`] parsing and rendering.
//! - [`request`]: [`CheckRequest`] / [`MutationRequest`] builders and JSON
//!   argument parsing (check context, object meta).
//! - [`builtin`]: built-in resource types and the assign/remove shortcut
//!   table keyed by `(subjectType, objectType)`.
//! - [`error`]: [`WarrantError`].
//!
//! ## Crate Policy
//!
//! - No I/O, no network, no global state.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All request types derive `Debug`, `Clone`, and `Serialize`.

pub mod builtin;
pub mod error;
pub mod reference;
pub mod request;

pub use builtin::{Association, BuiltinType};
pub use error::WarrantError;
pub use reference::{ObjectGrammar, ObjectRef, SubjectRef};
pub use request::{
    build_check_request, build_mutation_request, parse_context, parse_object_meta, CheckRequest,
    MutationRequest, ObjectMeta, PolicyContext,
};
