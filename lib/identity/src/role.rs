//! Role definitions and role assignments.
//!
//! Roles are immutable reference data: a unique name plus an optional
//! privilege classification. Users are linked to roles through
//! `RoleAssignment`, the join value that carries a grant.

use campus_core::RoleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered privilege classification of a role.
///
/// The ordering follows privilege: `Admin > Teacher > Student`. This is
/// used strictly for priority resolution and is distinct from a role's
/// free-form name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleType {
    /// Standard learner access.
    Student,
    /// Instructor access.
    Teacher,
    /// Full administrative access.
    Admin,
}

impl RoleType {
    /// Returns true if this is the administrative classification.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Teacher => "TEACHER",
            Self::Student => "STUDENT",
        }
    }
}

impl std::str::FromStr for RoleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "TEACHER" => Ok(Self::Teacher),
            "STUDENT" => Ok(Self::Student),
            other => Err(format!("unknown role type '{other}'")),
        }
    }
}

/// A named permission class.
///
/// Roles are looked up by their unique name. The role type is optional:
/// a role without a classification still produces an authority token but
/// never participates in priority resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role ID.
    id: RoleId,
    /// Unique role name, e.g. "ADMIN".
    name: String,
    /// Privilege classification, if any.
    role_type: Option<RoleType>,
}

impl Role {
    /// Creates a new role definition.
    #[must_use]
    pub fn new(name: String, role_type: Option<RoleType>) -> Self {
        Self {
            id: RoleId::new(),
            name,
            role_type,
        }
    }

    /// Creates a role with all fields specified.
    ///
    /// Use this when reconstituting a role from storage.
    #[must_use]
    pub fn with_id(id: RoleId, name: String, role_type: Option<RoleType>) -> Self {
        Self {
            id,
            name,
            role_type,
        }
    }

    /// Returns the role's ID.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the role's privilege classification, if any.
    #[must_use]
    pub fn role_type(&self) -> Option<RoleType> {
        self.role_type
    }
}

/// A grant linking one user to one role.
///
/// Assignments have set semantics within a user: a user never holds two
/// assignments to the same role. Equality and hashing are therefore
/// defined over the role ID alone, not the grant timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    role: Role,
    granted_at: DateTime<Utc>,
}

impl RoleAssignment {
    /// Creates a new assignment granting the given role now.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            granted_at: Utc::now(),
        }
    }

    /// Creates an assignment with an explicit grant time, for
    /// reconstitution from storage.
    #[must_use]
    pub fn with_granted_at(role: Role, granted_at: DateTime<Utc>) -> Self {
        Self { role, granted_at }
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Returns when the role was granted.
    #[must_use]
    pub fn granted_at(&self) -> DateTime<Utc> {
        self.granted_at
    }
}

impl PartialEq for RoleAssignment {
    fn eq(&self, other: &Self) -> bool {
        self.role.id() == other.role.id()
    }
}

impl Eq for RoleAssignment {}

impl std::hash::Hash for RoleAssignment {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.role.id().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_type_ordering_follows_privilege() {
        assert!(RoleType::Admin > RoleType::Teacher);
        assert!(RoleType::Teacher > RoleType::Student);
    }

    #[test]
    fn role_type_is_admin() {
        assert!(RoleType::Admin.is_admin());
        assert!(!RoleType::Teacher.is_admin());
        assert!(!RoleType::Student.is_admin());
    }

    #[test]
    fn role_type_string_roundtrip() {
        for role_type in [RoleType::Admin, RoleType::Teacher, RoleType::Student] {
            let parsed: RoleType = role_type.as_str().parse().expect("parse");
            assert_eq!(parsed, role_type);
        }
        assert!("JANITOR".parse::<RoleType>().is_err());
    }

    #[test]
    fn role_type_serialization_format() {
        let json = serde_json::to_string(&RoleType::Admin).expect("serialize");
        assert_eq!(json, "\"ADMIN\"");

        let json = serde_json::to_string(&RoleType::Student).expect("serialize");
        assert_eq!(json, "\"STUDENT\"");
    }

    #[test]
    fn new_role_has_generated_id() {
        let role = Role::new("TEACHER".to_string(), Some(RoleType::Teacher));
        assert!(role.id().to_string().starts_with("role_"));
        assert_eq!(role.name(), "TEACHER");
        assert_eq!(role.role_type(), Some(RoleType::Teacher));
    }

    #[test]
    fn role_without_classification() {
        let role = Role::new("AUDITOR".to_string(), None);
        assert!(role.role_type().is_none());
    }

    #[test]
    fn assignments_to_same_role_are_equal() {
        let role = Role::new("ADMIN".to_string(), Some(RoleType::Admin));
        let a = RoleAssignment::new(role.clone());
        std::thread::sleep(std::time::Duration::from_millis(1));
        let b = RoleAssignment::new(role);

        // Grant time differs, equality ignores it
        assert_eq!(a, b);
    }

    #[test]
    fn assignments_dedupe_in_a_set() {
        use std::collections::HashSet;

        let admin = Role::new("ADMIN".to_string(), Some(RoleType::Admin));
        let teacher = Role::new("TEACHER".to_string(), Some(RoleType::Teacher));

        let mut set = HashSet::new();
        set.insert(RoleAssignment::new(admin.clone()));
        set.insert(RoleAssignment::new(admin));
        set.insert(RoleAssignment::new(teacher));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn role_serialization_roundtrip() {
        let role = Role::new("STUDENT".to_string(), Some(RoleType::Student));
        let json = serde_json::to_string(&role).expect("serialize");
        let parsed: Role = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(role, parsed);
    }
}
