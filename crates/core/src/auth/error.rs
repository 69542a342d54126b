//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;
use crate::types::EmailError;

/// Errors that can occur during authentication operations.
///
/// The `Display` text of the validation variants is the message shown to the
/// user; credential failures deliberately carry no detail.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required form field was left blank.
    #[error("Please fill in all fields")]
    MissingFields,

    /// The email address is malformed.
    #[error("Please enter a valid email address")]
    InvalidEmail(#[from] EmailError),

    /// The phone number is too short.
    #[error("Please enter a valid phone number")]
    InvalidPhone,

    /// No stored account matches the email and password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// The durable store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Returns true for errors caused by user input rather than the system.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFields
                | Self::InvalidEmail(_)
                | Self::InvalidPhone
                | Self::InvalidCredentials
                | Self::NotAuthenticated
        )
    }
}
