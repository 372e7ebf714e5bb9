//! Contact form submissions: public write, guarded admin read.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::validation;
use crate::db::{AuthUser, ContactMessage, ContactRequest, CONTACTS};
use crate::AppState;

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validation::validate_contact(&request)?;

    let message = ContactMessage {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        phone: request.phone.trim().to_string(),
        email: request.email.trim().to_string(),
        company: request.company.map(|c| c.trim().to_string()).unwrap_or_default(),
        message: request.message.trim().to_string(),
        timestamp: Utc::now(),
    };

    let mut contacts: Vec<ContactMessage> = state.store.load_or_default(CONTACTS).await?;
    contacts.push(message.clone());
    state.store.save(CONTACTS, &contacts).await?;

    tracing::info!(contact_id = %message.id, "Contact submission stored");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": message.id })),
    ))
}

pub async fn list_contacts(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    let contacts: Vec<ContactMessage> = state.store.load_or_default(CONTACTS).await?;
    Ok(Json(contacts))
}
