//! Contact submissions and quote requests coming in from the public site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub id: String,
    pub items: Vec<QuoteItem>,
    pub contact_info: QuoteContactInfo,
    pub notes: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price_range: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteContactInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuoteRequest {
    #[serde(default)]
    pub items: Vec<QuoteItem>,
    pub contact_info: Option<QuoteContactInfo>,
    pub notes: Option<String>,
}
