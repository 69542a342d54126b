//! Authentication route handlers.
//!
//! Accounts live in the shared durable store; the signed-in state lives in
//! the visitor's session. Every handler locks the store only for the core
//! call and releases it before touching the session.

use axum::{Json, extract::State};
use echoeats_core::auth::{self, AuthSession, UserProfile};
use echoeats_core::AuthError;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{session as visitor, session_keys};
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup form data.
#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub password: String,
}

/// Profile form data.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// A profile plus the notice to show.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub message: &'static str,
}

/// Notice-only response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Current-user response; `user` is null when signed out.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
}

/// Sign in.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    auth::validate_login_input(&form.email, &form.password)?;

    let mut auth: AuthSession = visitor::load(&session, session_keys::AUTH).await?;
    let user = {
        let mut store = state.store()?;
        auth.login(&mut *store, &form.email, &form.password)?.clone()
    };

    // New identity, new session id
    session.cycle_id().await?;
    visitor::save(&session, session_keys::AUTH, &auth).await?;

    set_sentry_user(user.email.as_str());
    add_breadcrumb("auth", "Signed in");
    tracing::info!("User signed in");

    Ok(Json(AuthResponse {
        user,
        message: "Welcome back to EchoEats!",
    }))
}

/// Register the local account and sign in.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<SignupRequest>,
) -> Result<Json<AuthResponse>> {
    if form.password.is_empty() {
        return Err(AuthError::MissingFields.into());
    }
    let profile = UserProfile::parse(&form.name, &form.email, &form.phone, &form.location)?;

    let mut auth: AuthSession = visitor::load(&session, session_keys::AUTH).await?;
    let user = {
        let mut store = state.store()?;
        auth.signup(&mut *store, profile, &form.password)?.clone()
    };

    session.cycle_id().await?;
    visitor::save(&session, session_keys::AUTH, &auth).await?;

    set_sentry_user(user.email.as_str());
    add_breadcrumb("auth", "Signed up");
    tracing::info!("Account created");

    Ok(Json(AuthResponse {
        user,
        message: "Account created successfully!",
    }))
}

/// Sign out, dropping the visitor's cart and conversation with the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<MessageResponse>> {
    session.flush().await?;
    clear_sentry_user();
    tracing::info!("User signed out");

    Ok(Json(MessageResponse {
        message: "Logged out successfully",
    }))
}

/// Current user, if any.
#[instrument(skip(user))]
pub async fn me(OptionalAuth(user): OptionalAuth) -> Json<MeResponse> {
    Json(MeResponse {
        authenticated: user.is_some(),
        user,
    })
}

/// Edit the signed-in user's profile.
#[instrument(skip(state, session, _user))]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Json(form): Json<ProfileRequest>,
) -> Result<Json<AuthResponse>> {
    let profile = UserProfile::parse(&form.name, &form.email, &form.phone, &form.location)?;

    let mut auth: AuthSession = visitor::load(&session, session_keys::AUTH).await?;
    let user = {
        let mut store = state.store()?;
        auth.update_profile(&mut *store, profile)?.clone()
    };
    visitor::save(&session, session_keys::AUTH, &auth).await?;

    set_sentry_user(user.email.as_str());
    Ok(Json(AuthResponse {
        user,
        message: "Profile updated successfully!",
    }))
}
