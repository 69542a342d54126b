//! Authentication state.
//!
//! A session is either anonymous or holds the signed-in [`UserProfile`].
//! Accounts live in the durable store: one profile slot and one password
//! hash, so registering again replaces the previous account. A hardcoded
//! demo credential works regardless of what is stored.
//!
//! The session never touches storage on its own; every operation that reads
//! or writes accounts takes the store as an argument.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, keys};
use crate::types::Email;

/// Email of the built-in demo account.
pub const DEMO_EMAIL: &str = "demo@echoears.com";

/// Password of the built-in demo account.
pub const DEMO_PASSWORD: &str = "demo123";

/// Minimum number of characters in a phone number.
const MIN_PHONE_LENGTH: usize = 10;

/// Profile of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: Email,
    pub phone: String,
    /// Free-form home city or area, e.g. "San Francisco, CA".
    pub location: String,
}

impl UserProfile {
    /// Build a profile from raw form input.
    ///
    /// Fields are trimmed before validation.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingFields`] if any field is blank
    /// - [`AuthError::InvalidEmail`] if the email is malformed
    /// - [`AuthError::InvalidPhone`] if the phone has fewer than 10 characters
    pub fn parse(name: &str, email: &str, phone: &str, location: &str) -> Result<Self, AuthError> {
        let (name, email, phone, location) =
            (name.trim(), email.trim(), phone.trim(), location.trim());
        if [name, email, phone, location].iter().any(|f| f.is_empty()) {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(email)?;
        if phone.chars().count() < MIN_PHONE_LENGTH {
            return Err(AuthError::InvalidPhone);
        }

        Ok(Self {
            name: name.to_owned(),
            email,
            phone: phone.to_owned(),
            location: location.to_owned(),
        })
    }

    /// First word of the name, used for greetings.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Profile of the built-in demo account.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            name: "Demo User".to_owned(),
            email: Email::from_trusted(DEMO_EMAIL),
            phone: "+1 (555) 123-4567".to_owned(),
            location: "San Francisco, CA".to_owned(),
        }
    }
}

/// Check sign-in form input before attempting a login.
///
/// # Errors
///
/// Returns [`AuthError::MissingFields`] if either field is blank, or
/// [`AuthError::InvalidEmail`] if the email is malformed.
pub fn validate_login_input(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    Email::parse(email)?;
    Ok(())
}

/// Authentication state of one visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    user: Option<UserProfile>,
}

impl AuthSession {
    /// A signed-out session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resume from storage: authenticated if a profile is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored profile cannot be read.
    pub fn restore<S: KeyValueStore>(store: &S) -> Result<Self, AuthError> {
        let user = store.get_json::<UserProfile>(keys::USER)?;
        Ok(Self { user })
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Sign in with the demo credential or the stored account.
    ///
    /// A successful demo login writes the demo profile into the profile slot,
    /// leaving the stored password hash alone.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when nothing matches, or a
    /// storage error if the store fails.
    pub fn login<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        email: &str,
        password: &str,
    ) -> Result<&UserProfile, AuthError> {
        let email = email.trim();

        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            let demo = UserProfile::demo();
            store.set_json(keys::USER, &demo)?;
            return Ok(&*self.user.insert(demo));
        }

        let Some(stored) = store.get_json::<UserProfile>(keys::USER)? else {
            return Err(AuthError::InvalidCredentials);
        };
        let Some(hash) = store.get(keys::PASSWORD)? else {
            return Err(AuthError::InvalidCredentials);
        };

        if stored.email != *email {
            return Err(AuthError::InvalidCredentials);
        }
        verify_password(password, &hash)?;

        Ok(&*self.user.insert(stored))
    }

    /// Register the single local account and sign in.
    ///
    /// Always replaces whatever account was stored before.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the store fails.
    pub fn signup<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        profile: UserProfile,
        password: &str,
    ) -> Result<&UserProfile, AuthError> {
        let hash = hash_password(password)?;
        store.set_json(keys::USER, &profile)?;
        store.set(keys::PASSWORD, hash)?;
        Ok(&*self.user.insert(profile))
    }

    /// Sign out. Stored accounts are kept so the user can sign in again.
    pub fn logout(&mut self) {
        self.user = None;
    }

    /// Replace the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] for anonymous sessions, or a
    /// storage error if the store fails.
    pub fn update_profile<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        profile: UserProfile,
    ) -> Result<&UserProfile, AuthError> {
        if self.user.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        store.set_json(keys::USER, &profile)?;
        Ok(&*self.user.insert(profile))
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash. Unparseable hashes never match.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
