//! Per-request authentication context.
//!
//! The context is an explicit value handed through the request-handling
//! call chain, never a process-wide slot. Upstream identity verification
//! produces a verified context with an empty authority list; the identity
//! bridge re-issues it with locally-derived authorities.

use serde::{Deserialize, Serialize};

use crate::authority::Authority;

/// The authentication state of one inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthContext {
    /// No verified principal; the request proceeds unauthenticated.
    Anonymous,
    /// An externally verified principal with locally-scoped authorities.
    Verified {
        /// The verified principal name (username), as presented upstream.
        principal: String,
        /// Opaque credentials carried alongside the principal, if any.
        credentials: Option<String>,
        /// Authority tokens granted by the local user record. Empty
        /// until the identity bridge re-issues the context.
        authorities: Vec<Authority>,
    },
}

impl AuthContext {
    /// Creates a verified context with no authorities yet.
    ///
    /// This is the inbound shape produced by upstream verification.
    #[must_use]
    pub fn verified(principal: String, credentials: Option<String>) -> Self {
        Self::Verified {
            principal,
            credentials,
            authorities: Vec::new(),
        }
    }

    /// Returns true if the context is the anonymous marker.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Returns the principal name, if verified.
    #[must_use]
    pub fn principal(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Verified { principal, .. } => Some(principal),
        }
    }

    /// Returns the granted authority tokens.
    ///
    /// Anonymous contexts have none.
    #[must_use]
    pub fn authorities(&self) -> &[Authority] {
        match self {
            Self::Anonymous => &[],
            Self::Verified { authorities, .. } => authorities,
        }
    }

    /// Returns true if the context carries the given authority token.
    #[must_use]
    pub fn has_authority(&self, token: &str) -> bool {
        self.authorities().iter().any(|a| a.as_str() == token)
    }

    /// Returns true if the context carries the administrative authority.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_authority("ROLE_ADMIN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_principal_or_authorities() {
        let ctx = AuthContext::Anonymous;
        assert!(ctx.is_anonymous());
        assert!(ctx.principal().is_none());
        assert!(ctx.authorities().is_empty());
        assert!(!ctx.is_admin());
    }

    #[test]
    fn inbound_verified_context_has_empty_authorities() {
        let ctx = AuthContext::verified("ada".to_string(), Some("token".to_string()));
        assert!(!ctx.is_anonymous());
        assert_eq!(ctx.principal(), Some("ada"));
        assert!(ctx.authorities().is_empty());
    }

    #[test]
    fn authority_membership_checks() {
        let ctx = AuthContext::Verified {
            principal: "ada".to_string(),
            credentials: None,
            authorities: vec![
                Authority::from_role_name("teacher"),
                Authority::from_role_name("student"),
            ],
        };

        assert!(ctx.has_authority("ROLE_TEACHER"));
        assert!(ctx.has_authority("ROLE_STUDENT"));
        assert!(!ctx.has_authority("ROLE_ADMIN"));
        assert!(!ctx.is_admin());
    }

    #[test]
    fn admin_authority_grants_is_admin() {
        let ctx = AuthContext::Verified {
            principal: "root".to_string(),
            credentials: None,
            authorities: vec![Authority::from_role_name("admin")],
        };
        assert!(ctx.is_admin());
    }
}
