//! Saved delivery locations.
//!
//! A [`LocationBook`] is an ordered list of addresses plus a separate
//! "selected" pointer. The pointer always refers to an entry in the list or
//! is empty.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError, keys};
use crate::types::LocationId;

/// Errors from location operations.
#[derive(Debug, Error)]
pub enum LocationError {
    /// Label or address was blank.
    #[error("Please enter both a label and an address")]
    MissingFields,

    /// No location with this id.
    #[error("location {0} not found")]
    NotFound(LocationId),

    /// Every location id is taken.
    #[error("no location ids left")]
    IdsExhausted,

    /// An address search was submitted without text.
    #[error("Please enter an address to search")]
    EmptySearch,

    /// The durable store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Kind of place, used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Home,
    Work,
    #[default]
    Other,
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Home => "home",
            Self::Work => "work",
            Self::Other => "other",
        })
    }
}

/// Latitude/longitude pair from a geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A named, reusable delivery address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub id: LocationId,
    pub label: String,
    pub address: String,
    pub kind: LocationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Input for a new location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLocation {
    pub label: String,
    pub address: String,
    #[serde(default)]
    pub kind: LocationKind,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl NewLocation {
    /// A location of kind `other` with no geocoding data.
    #[must_use]
    pub fn new(label: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            address: address.into(),
            ..Self::default()
        }
    }
}

/// Replacement values for an existing location.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationUpdate {
    pub label: String,
    pub address: String,
    #[serde(default)]
    pub kind: Option<LocationKind>,
}

/// Ordered saved locations with a selection pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationBook {
    locations: Vec<SavedLocation>,
    selected: Option<LocationId>,
}

impl Default for LocationBook {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LocationBook {
    /// An empty book with nothing selected.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            locations: Vec::new(),
            selected: None,
        }
    }

    /// The starter book: Home, Work and Gym, with Home selected.
    #[must_use]
    pub fn with_defaults() -> Self {
        let starter = [
            (1, "Home", "123 Main Street, Apartment 4B, New York, NY 10001", LocationKind::Home),
            (2, "Work", "456 Business Ave, Suite 200, New York, NY 10002", LocationKind::Work),
            (3, "Gym", "789 Fitness Blvd, New York, NY 10003", LocationKind::Other),
        ];
        let locations = starter
            .into_iter()
            .map(|(id, label, address, kind)| SavedLocation {
                id: LocationId::new(id),
                label: label.to_owned(),
                address: address.to_owned(),
                kind,
                place_id: None,
                coordinates: None,
            })
            .collect();
        Self {
            locations,
            selected: Some(LocationId::new(1)),
        }
    }

    /// Load the book from storage, falling back to the starter book.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored book cannot be read.
    pub fn load<S: KeyValueStore>(store: &S) -> Result<Self, LocationError> {
        Ok(store
            .get_json::<Self>(keys::LOCATIONS)?
            .unwrap_or_else(Self::with_defaults))
    }

    /// Persist the book.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), LocationError> {
        store.set_json(keys::LOCATIONS, self)?;
        Ok(())
    }

    /// All locations in order.
    #[must_use]
    pub fn locations(&self) -> &[SavedLocation] {
        &self.locations
    }

    /// Id of the selected location.
    #[must_use]
    pub const fn selected_id(&self) -> Option<LocationId> {
        self.selected
    }

    /// The selected location.
    #[must_use]
    pub fn selected(&self) -> Option<&SavedLocation> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Look up a location by id.
    #[must_use]
    pub fn get(&self, id: LocationId) -> Option<&SavedLocation> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// Append a location and select it.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::MissingFields`] if the label or address is blank.
    pub fn add(&mut self, new: NewLocation) -> Result<&SavedLocation, LocationError> {
        let (label, address) = require_fields(&new.label, &new.address)?;
        let id = self.next_id()?;
        self.locations.push(SavedLocation {
            id,
            label,
            address,
            kind: new.kind,
            place_id: new.place_id,
            coordinates: new.coordinates,
        });
        self.selected = Some(id);
        self.get(id).ok_or(LocationError::NotFound(id))
    }

    /// Replace the label, address and optionally kind of a location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::MissingFields`] for blank input or
    /// [`LocationError::NotFound`] for an unknown id.
    pub fn update(
        &mut self,
        id: LocationId,
        update: LocationUpdate,
    ) -> Result<&SavedLocation, LocationError> {
        let (label, address) = require_fields(&update.label, &update.address)?;
        let location = self
            .locations
            .iter_mut()
            .find(|location| location.id == id)
            .ok_or(LocationError::NotFound(id))?;

        if location.address != address {
            // Geocoding data describes the old address.
            location.place_id = None;
            location.coordinates = None;
        }
        location.label = label;
        location.address = address;
        if let Some(kind) = update.kind {
            location.kind = kind;
        }
        Ok(location)
    }

    /// Point the selection at a location.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::NotFound`] for an unknown id.
    pub fn select(&mut self, id: LocationId) -> Result<&SavedLocation, LocationError> {
        if self.get(id).is_none() {
            return Err(LocationError::NotFound(id));
        }
        self.selected = Some(id);
        self.get(id).ok_or(LocationError::NotFound(id))
    }

    /// Remove a location.
    ///
    /// If it was selected, the selection moves to the first remaining
    /// location, or becomes empty when none remain.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: LocationId) -> Result<SavedLocation, LocationError> {
        let index = self
            .locations
            .iter()
            .position(|location| location.id == id)
            .ok_or(LocationError::NotFound(id))?;
        let removed = self.locations.remove(index);

        if self.selected == Some(id) {
            self.selected = self.locations.first().map(|location| location.id);
        }
        Ok(removed)
    }

    fn next_id(&self) -> Result<LocationId, LocationError> {
        let max = self
            .locations
            .iter()
            .map(|location| location.id.as_i32())
            .max()
            .unwrap_or(0);
        max.checked_add(1)
            .map(LocationId::new)
            .ok_or(LocationError::IdsExhausted)
    }
}

/// Validate an address search query, returning it trimmed.
///
/// # Errors
///
/// Returns [`LocationError::EmptySearch`] if the query is blank.
pub fn validate_search_query(query: &str) -> Result<&str, LocationError> {
    let query = query.trim();
    if query.is_empty() {
        Err(LocationError::EmptySearch)
    } else {
        Ok(query)
    }
}

fn require_fields(label: &str, address: &str) -> Result<(String, String), LocationError> {
    let (label, address) = (label.trim(), address.trim());
    if label.is_empty() || address.is_empty() {
        return Err(LocationError::MissingFields);
    }
    Ok((label.to_owned(), address.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn id(n: i32) -> LocationId {
        LocationId::new(n)
    }

    #[test]
    fn test_defaults_select_home() {
        let book = LocationBook::with_defaults();
        assert_eq!(book.locations().len(), 3);
        assert_eq!(book.selected().unwrap().label, "Home");
        assert_eq!(book.get(id(3)).unwrap().kind, LocationKind::Other);
    }

    #[test]
    fn test_add_validates_and_selects() {
        let mut book = LocationBook::with_defaults();
        assert!(matches!(
            book.add(NewLocation::new("  ", "1 Road")),
            Err(LocationError::MissingFields)
        ));
        assert!(matches!(
            book.add(NewLocation::new("Friend", "")),
            Err(LocationError::MissingFields)
        ));

        let added = book.add(NewLocation::new(" Friend ", "1 Road")).unwrap();
        assert_eq!(added.id, id(4));
        assert_eq!(added.label, "Friend");
        assert_eq!(added.kind, LocationKind::Other);
        assert_eq!(book.selected_id(), Some(id(4)));
    }

    #[test]
    fn test_ids_do_not_collide_after_delete() {
        let mut book = LocationBook::with_defaults();
        book.delete(id(2)).unwrap();
        let added = book.add(NewLocation::new("Cafe", "2 Road")).unwrap();
        assert_eq!(added.id, id(4));
    }

    #[test]
    fn test_add_fails_when_ids_run_out() {
        let mut book = LocationBook {
            locations: vec![SavedLocation {
                id: LocationId::new(i32::MAX),
                label: "Last".to_owned(),
                address: "1 End Rd".to_owned(),
                kind: LocationKind::Other,
                place_id: None,
                coordinates: None,
            }],
            selected: Some(LocationId::new(i32::MAX)),
        };
        let before = book.clone();
        assert!(matches!(
            book.add(NewLocation::new("Next", "2 End Rd")),
            Err(LocationError::IdsExhausted)
        ));
        assert_eq!(book, before);
    }

    #[test]
    fn test_delete_selected_falls_back_to_first() {
        let mut book = LocationBook::with_defaults();
        book.select(id(2)).unwrap();
        book.delete(id(2)).unwrap();
        assert_eq!(book.selected_id(), Some(id(1)));

        book.select(id(3)).unwrap();
        book.delete(id(1)).unwrap();
        assert_eq!(book.selected_id(), Some(id(3)), "unselected delete keeps selection");
    }

    #[test]
    fn test_delete_last_clears_selection() {
        let mut book = LocationBook::with_defaults();
        for n in 1..=3 {
            book.delete(id(n)).unwrap();
        }
        assert!(book.locations().is_empty());
        assert!(book.selected().is_none());
    }

    #[test]
    fn test_unknown_ids() {
        let mut book = LocationBook::empty();
        assert!(matches!(book.select(id(9)), Err(LocationError::NotFound(_))));
        assert!(matches!(book.delete(id(9)), Err(LocationError::NotFound(_))));
    }

    #[test]
    fn test_update_clears_stale_geocode() {
        let mut book = LocationBook::empty();
        let mut new = NewLocation::new("Office", "9 Pine St");
        new.place_id = Some("osm:42".to_owned());
        new.coordinates = Some(Coordinates { lat: 1.0, lng: 2.0 });
        book.add(new).unwrap();

        let updated = book
            .update(
                id(1),
                LocationUpdate {
                    label: "Office".to_owned(),
                    address: "10 Pine St".to_owned(),
                    kind: Some(LocationKind::Work),
                },
            )
            .unwrap();
        assert_eq!(updated.kind, LocationKind::Work);
        assert!(updated.place_id.is_none());
        assert!(updated.coordinates.is_none());
    }

    #[test]
    fn test_load_and_save() {
        let mut store = MemoryStore::new();
        let mut book = LocationBook::load(&store).unwrap();
        assert_eq!(book, LocationBook::with_defaults());

        book.add(NewLocation::new("Park", "Central Park")).unwrap();
        book.save(&mut store).unwrap();

        let reloaded = LocationBook::load(&store).unwrap();
        assert_eq!(reloaded.selected().unwrap().label, "Park");
        assert_eq!(reloaded.locations().len(), 4);
    }

    #[test]
    fn test_search_query_validation() {
        assert!(matches!(
            validate_search_query("   "),
            Err(LocationError::EmptySearch)
        ));
        assert_eq!(validate_search_query(" 5th Ave ").unwrap(), "5th Ave");
    }
}
