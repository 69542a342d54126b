//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Health check
//!
//! # Menu (public)
//! GET    /api/categories              - Category tabs
//! GET    /api/menu?category=<id>      - Menu items, optionally filtered
//! GET    /api/menu/{id}               - Menu item detail
//!
//! # Auth
//! POST   /api/auth/login              - Sign in
//! POST   /api/auth/signup             - Register and sign in
//! POST   /api/auth/logout             - Sign out
//! GET    /api/auth/me                 - Current user
//! PUT    /api/auth/profile            - Edit profile (requires auth)
//!
//! # Cart (requires auth)
//! GET    /api/cart                    - Cart contents and totals
//! POST   /api/cart/add                - Add one unit
//! POST   /api/cart/update             - Set quantity (0 removes)
//! POST   /api/cart/remove             - Remove line
//! POST   /api/cart/checkout           - Place order
//!
//! # Locations (requires auth)
//! GET    /api/locations               - Saved locations
//! POST   /api/locations               - Save a location
//! GET    /api/locations/search?q=     - Geocoded address search
//! PUT    /api/locations/{id}          - Edit a location
//! DELETE /api/locations/{id}          - Delete a location
//! POST   /api/locations/{id}/select   - Select a location
//!
//! # Assistant (requires auth)
//! GET    /api/assistant               - Conversation
//! POST   /api/assistant/messages      - Send a message
//! ```

pub mod assistant;
pub mod auth;
pub mod cart;
pub mod locations;
pub mod menu;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .route("/{id}", get(menu::show))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/profile", put(auth::update_profile))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create the location routes router.
pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(locations::index).post(locations::create))
        .route("/search", get(locations::search))
        .route(
            "/{id}",
            put(locations::update).delete(locations::delete),
        )
        .route("/{id}/select", post(locations::select))
}

/// Create the assistant routes router.
pub fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(assistant::show))
        .route("/messages", post(assistant::send))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(menu::categories))
        .nest("/api/menu", menu_routes())
        .nest("/api/auth", auth_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/locations", location_routes())
        .nest("/api/assistant", assistant_routes())
}
