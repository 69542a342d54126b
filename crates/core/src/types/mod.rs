//! Core value types for EchoEats.
//!
//! This module provides type-safe wrappers for ids, prices and emails.

pub mod email;
pub mod id;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
