//! Site settings endpoints: public reads, guarded merge-updates.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::db::{AuthUser, Category, SettingsDocument, SettingsUpdate, SETTINGS};
use crate::AppState;

/// Public read; falls back to the default document when none is persisted.
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsDocument>, ApiError> {
    let settings: SettingsDocument = state.store.load_or_default(SETTINGS).await?;
    Ok(Json(settings))
}

/// Merge a partial update into the persisted document and return the result.
pub async fn update_settings(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<SettingsDocument>, ApiError> {
    let mut settings: SettingsDocument = state.store.load_or_default(SETTINGS).await?;
    settings.apply(update);
    state.store.save(SETTINGS, &settings).await?;

    tracing::info!(username = %user.username, "Settings updated");
    Ok(Json(settings))
}

pub async fn get_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let settings: SettingsDocument = state.store.load_or_default(SETTINGS).await?;
    Ok(Json(settings.categories))
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoriesRequest {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Replace the category list wholesale; add/edit/delete are resolved
/// client-side into the new list.
pub async fn update_categories(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateCategoriesRequest>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let mut settings: SettingsDocument = state.store.load_or_default(SETTINGS).await?;
    settings.categories = request.categories;
    state.store.save(SETTINGS, &settings).await?;

    tracing::info!(username = %user.username, count = settings.categories.len(), "Categories replaced");
    Ok(Json(settings.categories))
}
