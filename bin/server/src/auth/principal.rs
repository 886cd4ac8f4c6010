//! Principal extraction from trusted proxy headers.
//!
//! The authenticating reverse proxy validates the OIDC token upstream
//! and forwards the verified principal name (and optionally the access
//! token) in request headers. Requests without the principal header are
//! anonymous.

use axum::http::HeaderMap;
use campus_identity::AuthContext;

use crate::config::IdentityConfig;

/// Builds the inbound authentication context from request headers.
///
/// A missing or non-UTF-8 principal header yields
/// [`AuthContext::Anonymous`]; header verification is the proxy's job,
/// not ours, so no other validation happens here.
#[must_use]
pub fn context_from_headers(headers: &HeaderMap, config: &IdentityConfig) -> AuthContext {
    let Some(principal) = header_str(headers, &config.principal_header) else {
        return AuthContext::Anonymous;
    };
    if principal.is_empty() {
        return AuthContext::Anonymous;
    }

    let credentials = header_str(headers, &config.credentials_header).map(str::to_string);

    AuthContext::verified(principal.to_string(), credentials)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config() -> IdentityConfig {
        IdentityConfig::default()
    }

    #[test]
    fn missing_principal_header_is_anonymous() {
        let headers = HeaderMap::new();
        assert!(context_from_headers(&headers, &config()).is_anonymous());
    }

    #[test]
    fn empty_principal_header_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert("x-auth-request-user", HeaderValue::from_static(""));
        assert!(context_from_headers(&headers, &config()).is_anonymous());
    }

    #[test]
    fn principal_header_yields_verified_context() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-auth-request-user",
            HeaderValue::from_static("Ada.Lovelace@example.com"),
        );

        let ctx = context_from_headers(&headers, &config());
        // Normalization happens in the bridge, not here.
        assert_eq!(ctx.principal(), Some("Ada.Lovelace@example.com"));
        assert!(ctx.authorities().is_empty());
    }

    #[test]
    fn credentials_header_is_carried_along() {
        let mut headers = HeaderMap::new();
        headers.insert("x-auth-request-user", HeaderValue::from_static("ada"));
        headers.insert(
            "x-auth-request-access-token",
            HeaderValue::from_static("opaque-token"),
        );

        match context_from_headers(&headers, &config()) {
            AuthContext::Verified { credentials, .. } => {
                assert_eq!(credentials.as_deref(), Some("opaque-token"));
            }
            AuthContext::Anonymous => panic!("expected verified context"),
        }
    }
}
