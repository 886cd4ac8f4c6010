//! The identity bridge.
//!
//! Runs once per inbound request, after upstream identity verification
//! and before any handler. It reconciles the externally verified
//! principal against the local user directory, auto-provisions a user on
//! first sight, and re-issues the authentication context with
//! locally-derived authorities.
//!
//! The bridge takes and returns the context as an explicit value; the
//! server threads it through request extensions.

use crate::authority;
use crate::context::AuthContext;
use crate::directory::{RoleRegistry, UserDirectory};
use crate::error::{BridgeError, DirectoryError, RegistryError};
use crate::user::{self, User};

/// Bridges an externally verified principal into a locally authorized
/// context.
///
/// - Anonymous contexts pass through untouched, with no store access.
/// - A verified principal with no matching user record is
///   auto-provisioned with a single assignment to the configured default
///   role, then treated as known.
/// - Known principals get a re-issued context carrying the same
///   principal and credentials plus the authority list derived from
///   their assignments.
///
/// Two concurrent first-requests for the same username may race; the
/// loser's creation conflict is recovered by re-fetching the winner's
/// record and never surfaces to the caller.
///
/// # Errors
///
/// [`BridgeError::MissingDefaultRole`] when the configured default role
/// does not exist in the registry (a configuration defect); otherwise
/// store failures are propagated unchanged.
pub async fn bridge<D, R>(
    incoming: AuthContext,
    directory: &D,
    registry: &R,
    default_role: &str,
) -> Result<AuthContext, BridgeError>
where
    D: UserDirectory + ?Sized,
    R: RoleRegistry + ?Sized,
{
    let (principal, credentials) = match incoming {
        AuthContext::Anonymous => return Ok(AuthContext::Anonymous),
        AuthContext::Verified {
            principal,
            credentials,
            ..
        } => (principal, credentials),
    };

    let username = user::normalize_username(&principal);

    let record = match directory.find_by_username(&username).await? {
        Some(existing) => existing,
        None => provision(directory, registry, &username, default_role).await?,
    };

    Ok(AuthContext::Verified {
        principal,
        credentials,
        authorities: authority::authorities(record.roles()),
    })
}

/// Creates a local user record for a first-seen principal.
async fn provision<D, R>(
    directory: &D,
    registry: &R,
    username: &str,
    default_role: &str,
) -> Result<User, BridgeError>
where
    D: UserDirectory + ?Sized,
    R: RoleRegistry + ?Sized,
{
    let role = registry
        .find_by_name(default_role)
        .await
        .map_err(|e| match e {
            RegistryError::NotFound { name } => BridgeError::MissingDefaultRole { name },
            other => BridgeError::Registry(other),
        })?;

    // Upstream principal names are the provider's email claim, so the
    // username doubles as the initial email address.
    let mut user = User::new(username, username.to_string());
    user.grant_role(role);

    match directory.save(user).await {
        Ok(created) => {
            tracing::info!(username, "auto-provisioned first-seen user");
            Ok(created)
        }
        Err(DirectoryError::Conflict { .. }) => {
            // Lost the first-seen race; continue with the winner's record.
            tracing::debug!(username, "creation conflict, re-resolving");
            directory
                .find_by_username(username)
                .await?
                .ok_or_else(|| BridgeError::ProvisioningRace {
                    username: username.to_string(),
                })
        }
        Err(other) => Err(other.into()),
    }
}
