//! Domain models for storefront.
//!
//! Request and response bodies live next to their handlers; this module
//! holds what is stored per visitor.

pub mod session;

pub use session::keys as session_keys;
