//! EchoEats core - domain library for the food-ordering storefront.
//!
//! This crate holds everything the storefront and CLI share:
//! - the static menu catalog
//! - the shopping cart and its pricing rules
//! - mock authentication against a single stored account
//! - saved delivery locations
//! - the keyword-driven ordering assistant and its speech seam
//!
//! # Architecture
//!
//! The core crate performs no network or filesystem I/O. Anything durable goes
//! through the [`storage::KeyValueStore`] trait, which callers pass in
//! explicitly, and speech goes through [`assistant::voice::SpeechCapability`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and emails
//! - [`menu`] - Catalog and category filtering
//! - [`cart`] - Cart lines, totals and checkout
//! - [`auth`] - Login, signup, logout and profile edits
//! - [`location`] - Saved delivery addresses
//! - [`assistant`] - Intent classification and dialogue
//! - [`storage`] - Durable key-value store abstraction

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assistant;
pub mod auth;
pub mod cart;
pub mod location;
pub mod menu;
pub mod storage;
pub mod types;

pub use assistant::{Assistant, AssistantAction, ChatMessage, Sender};
pub use auth::{AuthError, AuthSession, UserProfile};
pub use cart::{Cart, CartLine, CartNotice, OrderReceipt};
pub use location::{LocationBook, LocationError, SavedLocation};
pub use menu::{CategoryFilter, MenuCategory, MenuItem};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use types::*;
