//! External services used by the storefront.
//!
//! # Services
//!
//! - `geocoding` - Address search for saved locations

pub mod geocoding;

pub use geocoding::{GeocodingClient, GeocodingError, PlaceSuggestion};
