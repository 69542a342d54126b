//! Session-related types.
//!
//! Each visitor's state lives in their session record: the auth state, the
//! primary cart and the assistant conversation. Nothing here is shared
//! between visitors.

use serde::{Serialize, de::DeserializeOwned};
use tower_sessions::Session;

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor's [`AuthSession`](echoeats_core::AuthSession).
    pub const AUTH: &str = "auth";

    /// Key for the primary [`Cart`](echoeats_core::Cart).
    pub const CART: &str = "cart";

    /// Key for the [`Assistant`](echoeats_core::Assistant) conversation.
    pub const ASSISTANT: &str = "assistant";
}

/// Read a value from the session, or its default when absent.
///
/// # Errors
///
/// Returns an error if the session store fails or the value is malformed.
pub async fn load<T>(session: &Session, key: &str) -> Result<T, tower_sessions::session::Error>
where
    T: DeserializeOwned + Default,
{
    Ok(session.get::<T>(key).await?.unwrap_or_default())
}

/// Write a value to the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save<T>(
    session: &Session,
    key: &str,
    value: &T,
) -> Result<(), tower_sessions::session::Error>
where
    T: Serialize + Sync,
{
    session.insert(key, value).await
}
