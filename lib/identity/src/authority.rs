//! Role priority resolution and authority tokens.
//!
//! Two pure computations over a user's role assignments:
//!
//! - [`priority_role_type`] collapses the assignment set to the single
//!   highest privilege classification, used for link-visibility style
//!   decisions.
//! - [`authorities`] expands the assignment set to the full list of
//!   authority tokens attached to the authentication context.
//!
//! Neither function mutates the user or caches its result; both are
//! deterministic for a given assignment set.

use serde::{Deserialize, Serialize};

use crate::role::{RoleAssignment, RoleType};

/// A granted permission in its string form, e.g. `ROLE_ADMIN`.
///
/// Authority tokens always have the shape `ROLE_` followed by the role
/// name upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    /// Builds the authority token for a role name.
    #[must_use]
    pub fn from_role_name(name: &str) -> Self {
        Self(format!("ROLE_{}", name.to_uppercase()))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves the single highest-priority role type across the assignments.
///
/// Priority order, highest first: `Admin > Teacher > Student`. The scan
/// short-circuits as soon as `Admin` is observed since nothing outranks
/// it. Assignments whose role carries no classification are skipped, not
/// treated as errors. Returns `None` for an empty set or a set with only
/// unclassified roles.
#[must_use]
pub fn priority_role_type(assignments: &[RoleAssignment]) -> Option<RoleType> {
    let mut has_teacher = false;
    let mut has_student = false;

    for assignment in assignments {
        match assignment.role().role_type() {
            Some(RoleType::Admin) => return Some(RoleType::Admin),
            Some(RoleType::Teacher) => has_teacher = true,
            Some(RoleType::Student) => has_student = true,
            None => {}
        }
    }

    if has_teacher {
        Some(RoleType::Teacher)
    } else if has_student {
        Some(RoleType::Student)
    } else {
        None
    }
}

/// Produces the full authority list for the assignments.
///
/// One token per assignment, each `ROLE_<NAME>` with the role name
/// upper-cased. Unlike [`priority_role_type`] this reflects every
/// assignment rather than collapsing to the highest privilege.
#[must_use]
pub fn authorities(assignments: &[RoleAssignment]) -> Vec<Authority> {
    assignments
        .iter()
        .map(|a| Authority::from_role_name(a.role().name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use std::collections::HashSet;

    fn assignment(name: &str, role_type: Option<RoleType>) -> RoleAssignment {
        RoleAssignment::new(Role::new(name.to_string(), role_type))
    }

    #[test]
    fn admin_wins_regardless_of_position() {
        let sets = vec![
            vec![assignment("ADMIN", Some(RoleType::Admin))],
            vec![
                assignment("STUDENT", Some(RoleType::Student)),
                assignment("ADMIN", Some(RoleType::Admin)),
            ],
            vec![
                assignment("ADMIN", Some(RoleType::Admin)),
                assignment("TEACHER", Some(RoleType::Teacher)),
                assignment("STUDENT", Some(RoleType::Student)),
            ],
        ];

        for set in sets {
            assert_eq!(priority_role_type(&set), Some(RoleType::Admin));
        }
    }

    #[test]
    fn teacher_outranks_student() {
        let set = vec![
            assignment("STUDENT", Some(RoleType::Student)),
            assignment("TEACHER", Some(RoleType::Teacher)),
        ];
        assert_eq!(priority_role_type(&set), Some(RoleType::Teacher));
    }

    #[test]
    fn student_alone_resolves_to_student() {
        let set = vec![assignment("STUDENT", Some(RoleType::Student))];
        assert_eq!(priority_role_type(&set), Some(RoleType::Student));
    }

    #[test]
    fn empty_set_resolves_to_none() {
        assert_eq!(priority_role_type(&[]), None);
    }

    #[test]
    fn unclassified_roles_are_skipped() {
        let set = vec![assignment("AUDITOR", None), assignment("GUEST", None)];
        assert_eq!(priority_role_type(&set), None);

        let set = vec![
            assignment("AUDITOR", None),
            assignment("STUDENT", Some(RoleType::Student)),
        ];
        assert_eq!(priority_role_type(&set), Some(RoleType::Student));
    }

    #[test]
    fn resolution_is_deterministic() {
        let set = vec![
            assignment("TEACHER", Some(RoleType::Teacher)),
            assignment("STUDENT", Some(RoleType::Student)),
        ];
        assert_eq!(priority_role_type(&set), priority_role_type(&set));
    }

    #[test]
    fn authority_token_shape() {
        let authority = Authority::from_role_name("admin");
        assert_eq!(authority.as_str(), "ROLE_ADMIN");

        let authority = Authority::from_role_name("Teacher");
        assert_eq!(authority.as_str(), "ROLE_TEACHER");
    }

    #[test]
    fn one_token_per_assignment() {
        let set = vec![
            assignment("TEACHER", Some(RoleType::Teacher)),
            assignment("STUDENT", Some(RoleType::Student)),
        ];

        let tokens = authorities(&set);
        assert_eq!(tokens.len(), 2);

        let as_set: HashSet<&str> = tokens.iter().map(Authority::as_str).collect();
        assert!(as_set.contains("ROLE_TEACHER"));
        assert!(as_set.contains("ROLE_STUDENT"));
    }

    #[test]
    fn authority_list_is_order_independent_as_a_set() {
        let forward = vec![
            assignment("TEACHER", Some(RoleType::Teacher)),
            assignment("STUDENT", Some(RoleType::Student)),
        ];
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();

        let a: HashSet<Authority> = authorities(&forward).into_iter().collect();
        let b: HashSet<Authority> = authorities(&reversed).into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn unclassified_roles_still_produce_tokens() {
        let set = vec![assignment("AUDITOR", None)];
        let tokens = authorities(&set);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].as_str(), "ROLE_AUDITOR");
    }

    #[test]
    fn empty_set_produces_no_tokens() {
        assert!(authorities(&[]).is_empty());
    }
}
