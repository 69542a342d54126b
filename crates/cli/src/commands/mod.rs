//! CLI command implementations.

pub mod chat;
pub mod locations;
pub mod menu;
