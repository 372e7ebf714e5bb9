//! Quote-request submissions: public write, guarded admin read.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::validation;
use crate::db::{AuthUser, QuoteContactInfo, QuoteRequest, SubmitQuoteRequest, QUOTES};
use crate::AppState;

pub async fn submit_quote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitQuoteRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validation::validate_quote(&request)?;

    let Some(info) = request.contact_info else {
        return Err(ApiError::bad_request("Contact details are required"));
    };

    let quote = QuoteRequest {
        id: Uuid::new_v4().to_string(),
        items: request.items,
        contact_info: QuoteContactInfo {
            name: info.name.trim().to_string(),
            phone: info.phone.trim().to_string(),
            email: info.email.trim().to_string(),
            company: info.company.trim().to_string(),
        },
        notes: request.notes.map(|n| n.trim().to_string()).unwrap_or_default(),
        status: "pending".to_string(),
        timestamp: Utc::now(),
    };

    let mut quotes: Vec<QuoteRequest> = state.store.load_or_default(QUOTES).await?;
    quotes.push(quote.clone());
    state.store.save(QUOTES, &quotes).await?;

    tracing::info!(quote_id = %quote.id, items = quote.items.len(), "Quote request stored");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": quote.id })),
    ))
}

pub async fn list_quotes(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QuoteRequest>>, ApiError> {
    let quotes: Vec<QuoteRequest> = state.store.load_or_default(QUOTES).await?;
    Ok(Json(quotes))
}
