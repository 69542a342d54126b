//! Saved delivery location handlers.
//!
//! The location book is kept in the shared durable store. Each mutation is a
//! single load, change and save while the store lock is held.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use echoeats_core::location::{
    self, Coordinates, LocationBook, LocationKind, LocationUpdate, NewLocation,
};
use echoeats_core::{LocationError, LocationId, SavedLocation};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::services::PlaceSuggestion;
use crate::state::AppState;

/// The whole book as shown in the location picker.
#[derive(Debug, Serialize)]
pub struct LocationsView {
    pub locations: Vec<SavedLocation>,
    pub selected_id: Option<LocationId>,
}

impl From<&LocationBook> for LocationsView {
    fn from(book: &LocationBook) -> Self {
        Self {
            locations: book.locations().to_vec(),
            selected_id: book.selected_id(),
        }
    }
}

/// A changed location plus the resulting book.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub location: SavedLocation,
    #[serde(flatten)]
    pub book: LocationsView,
}

/// New location form data. Coordinates come from a picked search result.
#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    pub label: String,
    pub address: String,
    #[serde(default)]
    pub kind: LocationKind,
    pub place_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl From<CreateLocationRequest> for NewLocation {
    fn from(form: CreateLocationRequest) -> Self {
        let coordinates = match (form.lat, form.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };
        Self {
            label: form.label,
            address: form.address,
            kind: form.kind,
            place_id: form.place_id,
            coordinates,
        }
    }
}

/// Address search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Run one change against the stored book and persist it.
fn modify<T>(
    state: &AppState,
    change: impl FnOnce(&mut LocationBook) -> std::result::Result<T, LocationError>,
) -> Result<(T, LocationBook)> {
    let mut store = state.store()?;
    let mut book = LocationBook::load(&*store)?;
    let out = change(&mut book)?;
    book.save(&mut *store)?;
    Ok((out, book))
}

fn respond(location: SavedLocation, book: &LocationBook) -> Json<LocationResponse> {
    Json(LocationResponse {
        location,
        book: book.into(),
    })
}

/// List saved locations.
#[instrument(skip(state, _user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<LocationsView>> {
    let book = LocationBook::load(&*state.store()?)?;
    Ok(Json(LocationsView::from(&book)))
}

/// Save a new location and select it.
#[instrument(skip(state, _user))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(form): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>)> {
    let (location, book) = modify(&state, |book| book.add(form.into()).cloned())?;
    tracing::info!(location_id = %location.id, "Location saved");
    Ok((StatusCode::CREATED, respond(location, &book)))
}

/// Edit a location.
#[instrument(skip(state, _user))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<LocationId>,
    Json(form): Json<LocationUpdate>,
) -> Result<Json<LocationResponse>> {
    let (location, book) = modify(&state, |book| book.update(id, form).cloned())?;
    Ok(respond(location, &book))
}

/// Make a location the delivery target.
#[instrument(skip(state, _user))]
pub async fn select(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<LocationId>,
) -> Result<Json<LocationResponse>> {
    let (location, book) = modify(&state, |book| book.select(id).cloned())?;
    Ok(respond(location, &book))
}

/// Delete a location.
#[instrument(skip(state, _user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<LocationId>,
) -> Result<Json<LocationResponse>> {
    let (location, book) = modify(&state, |book| book.delete(id))?;
    tracing::info!(location_id = %id, "Location deleted");
    Ok(respond(location, &book))
}

/// Search the geocoder for an address.
#[instrument(skip(state, _user))]
pub async fn search(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<PlaceSuggestion>>> {
    let q = location::validate_search_query(&query.q)?;
    let geocoder = state
        .geocoder()
        .ok_or_else(|| AppError::Unavailable("Address search is not configured".to_string()))?;

    Ok(Json(geocoder.search(q).await?))
}
