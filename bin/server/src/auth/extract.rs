//! Authentication extractors for Axum routes.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use campus_identity::AuthContext;

/// Extractor for requiring a verified principal.
///
/// The wrapped context always carries the authorities the bridge
/// derived for this request.
pub struct RequireAuth(pub AuthContext);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            // The bridge layer always inserts a context; its absence
            // means the route was mounted outside the layer.
            .ok_or(AuthRejection::InternalError)?;

        if context.is_anonymous() {
            return Err(AuthRejection::NotAuthenticated);
        }

        Ok(RequireAuth(context))
    }
}

/// Extractor for optionally getting the verified context.
///
/// Returns None for anonymous requests.
pub struct OptionalAuth(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match RequireAuth::from_request_parts(parts, state).await {
            Ok(RequireAuth(context)) => Ok(OptionalAuth(Some(context))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

/// Extractor for requiring the administrative authority.
pub struct RequireAdmin(pub AuthContext);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(context) = RequireAuth::from_request_parts(parts, state).await?;

        if !context.is_admin() {
            return Err(AuthRejection::AdminRequired);
        }

        Ok(RequireAdmin(context))
    }
}

/// Rejection type for authentication extractors.
#[derive(Debug)]
pub enum AuthRejection {
    NotAuthenticated,
    AdminRequired,
    InternalError,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotAuthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required").into_response()
            }
            Self::AdminRequired => {
                (StatusCode::FORBIDDEN, "Admin access required").into_response()
            }
            Self::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use campus_identity::Authority;

    fn parts_with(context: Option<AuthContext>) -> Parts {
        let mut request = Request::builder().uri("/").body(()).expect("request");
        if let Some(context) = context {
            request.extensions_mut().insert(context);
        }
        request.into_parts().0
    }

    fn admin_context() -> AuthContext {
        AuthContext::Verified {
            principal: "root@example.com".to_string(),
            credentials: None,
            authorities: vec![Authority::from_role_name("admin")],
        }
    }

    #[tokio::test]
    async fn require_auth_rejects_anonymous() {
        let mut parts = parts_with(Some(AuthContext::Anonymous));
        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::NotAuthenticated)));
    }

    #[tokio::test]
    async fn require_auth_rejects_missing_extension() {
        let mut parts = parts_with(None);
        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::InternalError)));
    }

    #[tokio::test]
    async fn require_auth_passes_verified_context() {
        let mut parts = parts_with(Some(admin_context()));
        let RequireAuth(context) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .expect("verified context");
        assert_eq!(context.principal(), Some("root@example.com"));
    }

    #[tokio::test]
    async fn require_admin_rejects_non_admin() {
        let context = AuthContext::Verified {
            principal: "student@example.com".to_string(),
            credentials: None,
            authorities: vec![Authority::from_role_name("student")],
        };
        let mut parts = parts_with(Some(context));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::AdminRequired)));
    }

    #[tokio::test]
    async fn require_admin_passes_admin_context() {
        let mut parts = parts_with(Some(admin_context()));
        assert!(RequireAdmin::from_request_parts(&mut parts, &()).await.is_ok());
    }

    #[tokio::test]
    async fn optional_auth_is_none_for_anonymous() {
        let mut parts = parts_with(Some(AuthContext::Anonymous));
        let OptionalAuth(context) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .expect("infallible");
        assert!(context.is_none());
    }
}
