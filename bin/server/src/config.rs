//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.

use serde::Deserialize;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Address to bind the HTTP listener to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Identity bridging configuration.
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Identity-bridge related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Role granted to first-seen principals.
    ///
    /// Defaults to the observed legacy behavior of granting the
    /// highest-privilege role. Deployments that want a conservative
    /// default set IDENTITY__DEFAULT_ROLE=STUDENT.
    #[serde(default = "default_role")]
    pub default_role: String,

    /// Header carrying the upstream-verified principal name.
    ///
    /// Populated by the authenticating reverse proxy after OIDC token
    /// validation. The server must only be reachable through that proxy.
    #[serde(default = "default_principal_header")]
    pub principal_header: String,

    /// Header carrying the principal's opaque credentials, if forwarded.
    #[serde(default = "default_credentials_header")]
    pub credentials_header: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_role() -> String {
    "ADMIN".to_string()
}

fn default_principal_header() -> String {
    "x-auth-request-user".to_string()
}

fn default_credentials_header() -> String {
    "x-auth-request-access-token".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            principal_header: default_principal_header(),
            credentials_header: default_credentials_header(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_config_has_correct_defaults() {
        let config = IdentityConfig::default();
        assert_eq!(config.default_role, "ADMIN");
        assert_eq!(config.principal_header, "x-auth-request-user");
        assert_eq!(config.credentials_header, "x-auth-request-access-token");
    }
}
