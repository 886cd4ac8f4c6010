//! User identity records.
//!
//! A `User` is the local record reconciled against externally verified
//! principals. Usernames are unique and always stored lowercase; the
//! role assignments the user owns drive all local authorization.

use campus_core::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::authority::{self, Authority};
use crate::role::{Role, RoleAssignment, RoleType};

/// Normalizes a username for storage and lookup.
///
/// Normalization is idempotent and always produces lowercase output.
#[must_use]
pub fn normalize_username(username: &str) -> String {
    username.to_lowercase()
}

/// A local user identity record.
///
/// Created either by administrative provisioning or by first-seen
/// auto-provisioning in the identity bridge. The user exclusively owns
/// its role assignments; deleting the user deletes them all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Surrogate ID.
    id: UserId,
    /// Unique username, always lowercase.
    username: String,
    /// Unique email address.
    email: String,
    /// Optional first name.
    first_name: Option<String>,
    /// Optional last name.
    last_name: Option<String>,
    /// Optional phone number.
    phone: Option<String>,
    /// Role assignments owned by this user.
    roles: Vec<RoleAssignment>,
    /// When the record was created.
    created_at: DateTime<Utc>,
    /// When the record was last updated.
    updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given username and email.
    ///
    /// The username is normalized to lowercase; the ID is generated.
    #[must_use]
    pub fn new(username: &str, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username: normalize_username(username),
            email,
            first_name: None,
            last_name: None,
            phone: None,
            roles: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a user with all fields specified.
    ///
    /// Use this when reconstituting a user from storage. The username is
    /// still normalized; storage is never trusted to have done so.
    #[must_use]
    #[expect(clippy::too_many_arguments)]
    pub fn with_all_fields(
        id: UserId,
        username: &str,
        email: String,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
        roles: Vec<RoleAssignment>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: normalize_username(username),
            email,
            first_name,
            last_name,
            phone,
            roles,
            created_at,
            updated_at,
        }
    }

    /// Returns the user's ID.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the normalized username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the first name, if set.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Returns the last name, if set.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Returns the phone number, if set.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the role assignments owned by this user.
    #[must_use]
    pub fn roles(&self) -> &[RoleAssignment] {
        &self.roles
    }

    /// Returns when the record was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the record was last updated.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets the email address.
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Sets the first name.
    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.first_name = first_name;
        self.updated_at = Utc::now();
    }

    /// Sets the last name.
    pub fn set_last_name(&mut self, last_name: Option<String>) {
        self.last_name = last_name;
        self.updated_at = Utc::now();
    }

    /// Sets the phone number.
    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = phone;
        self.updated_at = Utc::now();
    }

    /// Splits a display name into first and last name.
    ///
    /// Anything after the first space lands in the last name.
    pub fn set_full_name(&mut self, name: &str) {
        let mut parts = name.splitn(2, ' ');
        self.first_name = parts.next().map(str::to_string);
        self.last_name = parts.next().map(str::to_string);
        self.updated_at = Utc::now();
    }

    /// Grants a role to this user.
    ///
    /// Assignments have set semantics: granting a role the user already
    /// holds is a no-op.
    pub fn grant_role(&mut self, role: Role) {
        if self.roles.iter().any(|a| a.role().id() == role.id()) {
            return;
        }
        self.roles.push(RoleAssignment::new(role));
        self.updated_at = Utc::now();
    }

    /// Revokes a role from this user, if held.
    pub fn revoke_role(&mut self, role_id: campus_core::RoleId) {
        let before = self.roles.len();
        self.roles.retain(|a| a.role().id() != role_id);
        if self.roles.len() != before {
            self.updated_at = Utc::now();
        }
    }

    /// Resolves the user's single highest-priority role type.
    ///
    /// Pure computation over the assignment set; nothing is cached.
    #[must_use]
    pub fn priority_role_type(&self) -> Option<RoleType> {
        authority::priority_role_type(&self.roles)
    }

    /// Returns the full authority list for the assignment set.
    #[must_use]
    pub fn authorities(&self) -> Vec<Authority> {
        authority::authorities(&self.roles)
    }
}

// Identity is defined by (id, username, email); profile fields and
// assignments do not participate.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.username == other.username && self.email == other.email
    }
}

impl Eq for User {}

impl std::hash::Hash for User {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.username.hash(state);
        self.email.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str, role_type: Option<RoleType>) -> Role {
        Role::new(name.to_string(), role_type)
    }

    #[test]
    fn username_is_normalized_on_creation() {
        let user = User::new("Ada.Lovelace", "ada@example.com".to_string());
        assert_eq!(user.username(), "ada.lovelace");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_username("MixedCase");
        let twice = normalize_username(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "mixedcase");
    }

    #[test]
    fn reconstitution_normalizes_username() {
        let user = User::with_all_fields(
            UserId::new(),
            "SHOUTING",
            "loud@example.com".to_string(),
            None,
            None,
            None,
            Vec::new(),
            Utc::now(),
            Utc::now(),
        );
        assert_eq!(user.username(), "shouting");
    }

    #[test]
    fn new_user_has_no_roles() {
        let user = User::new("fresh", "fresh@example.com".to_string());
        assert!(user.roles().is_empty());
        assert_eq!(user.priority_role_type(), None);
        assert!(user.authorities().is_empty());
    }

    #[test]
    fn grant_role_is_idempotent() {
        let mut user = User::new("grace", "grace@example.com".to_string());
        let admin = role("ADMIN", Some(RoleType::Admin));

        user.grant_role(admin.clone());
        user.grant_role(admin);
        assert_eq!(user.roles().len(), 1);
    }

    #[test]
    fn revoke_role_removes_assignment() {
        let mut user = User::new("grace", "grace@example.com".to_string());
        let teacher = role("TEACHER", Some(RoleType::Teacher));
        let teacher_id = teacher.id();

        user.grant_role(teacher);
        assert_eq!(user.roles().len(), 1);

        user.revoke_role(teacher_id);
        assert!(user.roles().is_empty());
    }

    #[test]
    fn priority_resolution_across_assignments() {
        let mut user = User::new("multi", "multi@example.com".to_string());
        user.grant_role(role("STUDENT", Some(RoleType::Student)));
        user.grant_role(role("TEACHER", Some(RoleType::Teacher)));
        assert_eq!(user.priority_role_type(), Some(RoleType::Teacher));

        user.grant_role(role("ADMIN", Some(RoleType::Admin)));
        assert_eq!(user.priority_role_type(), Some(RoleType::Admin));
    }

    #[test]
    fn set_full_name_splits_on_first_space() {
        let mut user = User::new("ada", "ada@example.com".to_string());
        user.set_full_name("Ada Lovelace");
        assert_eq!(user.first_name(), Some("Ada"));
        assert_eq!(user.last_name(), Some("Lovelace"));

        user.set_full_name("Prince");
        assert_eq!(user.first_name(), Some("Prince"));
        assert_eq!(user.last_name(), None);
    }

    #[test]
    fn equality_ignores_profile_fields() {
        let a = User::new("same", "same@example.com".to_string());
        let mut b = a.clone();
        b.set_phone(Some("555-0100".to_string()));
        b.grant_role(role("ADMIN", Some(RoleType::Admin)));
        assert_eq!(a, b);
    }

    #[test]
    fn equality_distinguishes_ids() {
        let a = User::new("same", "same@example.com".to_string());
        let b = User::new("same", "same@example.com".to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn set_email_updates_timestamp() {
        let mut user = User::new("ada", "old@example.com".to_string());
        let original = user.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(1));
        user.set_email("new@example.com".to_string());

        assert_eq!(user.email(), "new@example.com");
        assert!(user.updated_at() > original);
    }

    #[test]
    fn user_serialization_roundtrip() {
        let mut user = User::new("ada", "ada@example.com".to_string());
        user.grant_role(role("TEACHER", Some(RoleType::Teacher)));

        let json = serde_json::to_string(&user).expect("serialize");
        let parsed: User = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(user, parsed);
        assert_eq!(parsed.roles().len(), 1);
    }
}
