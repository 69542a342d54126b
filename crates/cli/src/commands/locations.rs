//! Saved location management against the durable store.

use std::path::Path;

use echoeats_core::location::{LocationKind, NewLocation};
use echoeats_core::{LocationBook, LocationError, LocationId, SavedLocation, StorageError};
use echoeats_storefront::store::FileStore;
use thiserror::Error;

/// Errors from the location commands.
#[derive(Debug, Error)]
pub enum LocationCommandError {
    #[error("unknown location kind '{0}' (expected home, work or other)")]
    UnknownKind(String),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

type Result<T> = std::result::Result<T, LocationCommandError>;

fn parse_kind(kind: &str) -> Result<LocationKind> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "home" => Ok(LocationKind::Home),
        "work" => Ok(LocationKind::Work),
        "other" => Ok(LocationKind::Other),
        other => Err(LocationCommandError::UnknownKind(other.to_owned())),
    }
}

/// Load the book, apply `change`, and write it back.
fn modify<T>(
    data_dir: &Path,
    change: impl FnOnce(&mut LocationBook) -> std::result::Result<T, LocationError>,
) -> Result<(T, LocationBook)> {
    let mut store = FileStore::open(data_dir)?;
    let mut book = LocationBook::load(&store)?;
    let out = change(&mut book)?;
    book.save(&mut store)?;
    Ok((out, book))
}

fn render(book: &LocationBook) -> String {
    if book.locations().is_empty() {
        return "No saved locations.\n".to_owned();
    }
    book.locations()
        .iter()
        .map(|location| {
            let marker = if book.selected_id() == Some(location.id) {
                '*'
            } else {
                ' '
            };
            format!(
                "{marker} {:>3}  {:<12} {:<6} {}\n",
                location.id.to_string(),
                location.label,
                location.kind.to_string(),
                location.address
            )
        })
        .collect()
}

#[allow(clippy::print_stdout)]
fn report(verb: &str, location: &SavedLocation, book: &LocationBook) {
    println!("{verb} '{}' ({})", location.label, location.address);
    print!("{}", render(book));
}

/// Print saved locations, marking the selected one.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or read.
#[allow(clippy::print_stdout)]
pub fn list(data_dir: &Path) -> Result<()> {
    let store = FileStore::open(data_dir)?;
    let book = LocationBook::load(&store)?;
    print!("{}", render(&book));
    Ok(())
}

/// Save a new location and select it.
///
/// # Errors
///
/// Returns an error for an unknown kind, blank fields, or a store failure.
pub fn add(data_dir: &Path, label: &str, address: &str, kind: &str) -> Result<()> {
    let new = NewLocation {
        kind: parse_kind(kind)?,
        ..NewLocation::new(label, address)
    };
    let (location, book) = modify(data_dir, |book| book.add(new).cloned())?;
    tracing::info!(location_id = %location.id, "Location saved");
    report("Saved", &location, &book);
    Ok(())
}

/// Select a location for delivery.
///
/// # Errors
///
/// Returns an error if the id is unknown or the store fails.
pub fn select(data_dir: &Path, id: i32) -> Result<()> {
    let (location, book) = modify(data_dir, |book| book.select(LocationId::new(id)).cloned())?;
    report("Selected", &location, &book);
    Ok(())
}

/// Delete a location.
///
/// # Errors
///
/// Returns an error if the id is unknown or the store fails.
pub fn delete(data_dir: &Path, id: i32) -> Result<()> {
    let (location, book) = modify(data_dir, |book| book.delete(LocationId::new(id)))?;
    report("Deleted", &location, &book);
    Ok(())
}
