//! Authentication extractors.
//!
//! The signed-in user is part of the visitor's [`AuthSession`], stored in
//! the tower-sessions record.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use echoeats_core::{AuthSession, UserProfile};
use serde_json::json;
use tower_sessions::Session;

use crate::models::session_keys;

/// Extractor that requires a signed-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.first_name())
/// }
/// ```
pub struct RequireAuth(pub UserProfile);

/// Error returned when authentication is required but the visitor is signed out.
pub enum AuthRejection {
    /// No session layer or session store failure.
    SessionUnavailable,
    /// Visitor is not signed in.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::SessionUnavailable => {
                tracing::error!("Session missing from request extensions");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Please sign in" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::SessionUnavailable)?;

        let auth: AuthSession = session
            .get(session_keys::AUTH)
            .await
            .map_err(|_| AuthRejection::SessionUnavailable)?
            .unwrap_or_default();

        auth.current_user()
            .cloned()
            .map(Self)
            .ok_or(AuthRejection::Unauthorized)
    }
}

/// Extractor that optionally gets the signed-in user.
///
/// Unlike `RequireAuth`, this does not reject signed-out visitors.
pub struct OptionalAuth(pub Option<UserProfile>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<AuthSession>(session_keys::AUTH)
                .await
                .ok()
                .flatten()
                .and_then(|auth| auth.current_user().cloned()),
            None => None,
        };

        Ok(Self(user))
    }
}
