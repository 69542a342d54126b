//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use echoeats_core::{AuthError, LocationError, StorageError};
use serde_json::json;
use thiserror::Error;

use crate::services::GeocodingError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication or profile operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Saved-location operation failed.
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// Durable store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Geocoder request failed.
    #[error("Geocoding error: {0}")]
    Geocoding(#[from] GeocodingError),

    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A feature is switched off by configuration.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingFields | AuthError::InvalidEmail(_) | AuthError::InvalidPhone => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::InvalidCredentials | AuthError::NotAuthenticated => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::PasswordHash | AuthError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Location(err) => match err {
                LocationError::MissingFields | LocationError::EmptySearch => {
                    StatusCode::BAD_REQUEST
                }
                LocationError::NotFound(_) => StatusCode::NOT_FOUND,
                LocationError::IdsExhausted | LocationError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Storage(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Geocoding(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message safe to show to the client.
    fn public_message(&self) -> String {
        match self {
            Self::Geocoding(_) => "Address search is temporarily unavailable".to_string(),
            Self::Auth(AuthError::NotAuthenticated) => "Please sign in".to_string(),
            // Validation messages are written for end users
            Self::Auth(err) if err.is_user_error() => err.to_string(),
            Self::Location(err @ (LocationError::MissingFields | LocationError::EmptySearch)) => {
                err.to_string()
            }
            Self::Location(LocationError::NotFound(id)) => format!("Location {id} not found"),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(msg) | Self::Unavailable(msg) => msg.clone(),
            // Don't expose internal error details to clients
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from the signed-in email.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use echoeats_core::LocationId;

    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Menu item 99".to_string());
        assert_eq!(err.to_string(), "Not found: Menu item 99");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(LocationError::IdsExhausted.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Unavailable("test".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_core_errors_map_to_client_statuses() {
        assert_eq!(
            status_of(AuthError::MissingFields.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(LocationError::NotFound(LocationId::new(9)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(LocationError::EmptySearch.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(GeocodingError::Parse("x".to_string()).into()),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_messages_hide_internal_details() {
        let err = AppError::Internal("disk on fire".to_string());
        assert_eq!(err.public_message(), "Internal server error");

        let err = AppError::from(AuthError::InvalidPhone);
        assert_eq!(err.public_message(), "Please enter a valid phone number");
    }
}
