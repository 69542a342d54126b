//! Menu route handlers.
//!
//! The menu is static and public: no session is needed to browse it.

use axum::{
    Json,
    extract::{Path, Query},
};
use echoeats_core::{CategoryFilter, MenuCategory, MenuItem, MenuItemId, menu};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};

/// A category tab.
#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub id: &'static str,
    pub name: &'static str,
}

/// Menu query parameters.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// List the category tabs, starting with "All".
#[instrument]
pub async fn categories() -> Json<Vec<CategoryView>> {
    let all = CategoryView {
        id: "all",
        name: "All",
    };
    let tabs = std::iter::once(all)
        .chain(MenuCategory::ALL.into_iter().map(|category| CategoryView {
            id: category.id(),
            name: category.display_name(),
        }))
        .collect();
    Json(tabs)
}

/// List menu items, optionally filtered by category.
#[instrument]
pub async fn index(Query(query): Query<MenuQuery>) -> Result<Json<Vec<MenuItem>>> {
    let filter = query
        .category
        .as_deref()
        .unwrap_or_default()
        .parse::<CategoryFilter>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(menu::filter(filter).cloned().collect()))
}

/// Show a single menu item.
#[instrument]
pub async fn show(Path(id): Path<MenuItemId>) -> Result<Json<MenuItem>> {
    menu::find(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Menu item {id}")))
}
