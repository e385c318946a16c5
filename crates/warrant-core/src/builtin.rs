//! # Built-in Resource Types
//!
//! The six resource types the service manages through dedicated `/v1`
//! collections, and the legal assign/remove shortcuts between them.
//!
//! ## Association Table
//!
//! | subject | object |
//! |---------|--------|
//! | user | tenant |
//! | role | user |
//! | permission | role |
//! | permission | user |
//! | feature | pricing-tier |
//! | feature | user |
//! | pricing-tier | tenant |
//! | pricing-tier | user |
//!
//! Every other pair is [`WarrantError::UnsupportedOperation`].

use std::fmt;
use std::str::FromStr;

use crate::error::WarrantError;
use crate::reference::ObjectRef;

/// A built-in resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    User,
    Tenant,
    Role,
    Permission,
    PricingTier,
    Feature,
}

impl BuiltinType {
    /// All built-in types, in display order.
    pub const ALL: [BuiltinType; 6] = [
        Self::User,
        Self::Tenant,
        Self::Role,
        Self::Permission,
        Self::PricingTier,
        Self::Feature,
    ];

    /// Singular type name as used in `type:id` tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Tenant => "tenant",
            Self::Role => "role",
            Self::Permission => "permission",
            Self::PricingTier => "pricing-tier",
            Self::Feature => "feature",
        }
    }

    /// REST collection name, e.g. `pricing-tiers`.
    pub fn collection(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Tenant => "tenants",
            Self::Role => "roles",
            Self::Permission => "permissions",
            Self::PricingTier => "pricing-tiers",
            Self::Feature => "features",
        }
    }

    /// Name of the id field in request and response bodies, e.g. `userId`.
    pub fn id_field(self) -> &'static str {
        match self {
            Self::User => "userId",
            Self::Tenant => "tenantId",
            Self::Role => "roleId",
            Self::Permission => "permissionId",
            Self::PricingTier => "pricingTierId",
            Self::Feature => "featureId",
        }
    }

    /// Parse a plural collection name (`users`, `pricing-tiers`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`WarrantError::UnsupportedType`] for anything else.
    pub fn from_collection(name: &str) -> Result<Self, WarrantError> {
        Self::ALL
            .into_iter()
            .find(|t| t.collection() == name)
            .ok_or_else(|| WarrantError::UnsupportedType(name.to_string()))
    }
}

impl FromStr for BuiltinType {
    type Err = WarrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| WarrantError::UnsupportedType(s.to_string()))
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One legal `(subject type, object type)` pair for the assign/remove
/// shortcuts. The subject is attached to (or detached from) the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Association {
    pub subject: BuiltinType,
    pub object: BuiltinType,
}

const ASSOCIATIONS: [Association; 8] = [
    Association::of(BuiltinType::User, BuiltinType::Tenant),
    Association::of(BuiltinType::Role, BuiltinType::User),
    Association::of(BuiltinType::Permission, BuiltinType::Role),
    Association::of(BuiltinType::Permission, BuiltinType::User),
    Association::of(BuiltinType::Feature, BuiltinType::PricingTier),
    Association::of(BuiltinType::Feature, BuiltinType::User),
    Association::of(BuiltinType::PricingTier, BuiltinType::Tenant),
    Association::of(BuiltinType::PricingTier, BuiltinType::User),
];

impl Association {
    const fn of(subject: BuiltinType, object: BuiltinType) -> Self {
        Self { subject, object }
    }

    /// Look up the shortcut for a pair of type names.
    ///
    /// # Errors
    ///
    /// Returns [`WarrantError::UnsupportedOperation`] when the pair is not in
    /// the table, including when either name is not a built-in type.
    pub fn lookup(subject_type: &str, object_type: &str) -> Result<Self, WarrantError> {
        ASSOCIATIONS
            .iter()
            .find(|a| a.subject.as_str() == subject_type && a.object.as_str() == object_type)
            .copied()
            .ok_or_else(|| WarrantError::UnsupportedOperation {
                subject_type: subject_type.to_string(),
                object_type: object_type.to_string(),
            })
    }

    /// Look up the shortcut for two parsed references.
    ///
    /// # Errors
    ///
    /// See [`Association::lookup`].
    pub fn for_refs(subject: &ObjectRef, object: &ObjectRef) -> Result<Self, WarrantError> {
        Self::lookup(subject.object_type(), object.object_type())
    }

    /// Path segments of the association resource relative to the API root,
    /// e.g. `v1/users/u1/roles/admin` for assigning `role:admin` to `user:u1`.
    /// Ids are returned unescaped; the caller percent-encodes each segment.
    pub fn segments<'a>(&self, subject_id: &'a str, object_id: &'a str) -> [&'a str; 5] {
        [
            "v1",
            self.object.collection(),
            object_id,
            self.subject.collection(),
            subject_id,
        ]
    }
}
