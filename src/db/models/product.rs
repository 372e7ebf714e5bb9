//! Catalog product models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub min_quantity: u32,
    pub price: String,
    pub featured: bool,
    pub image: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub const DEFAULT_MIN_QUANTITY: u32 = 50;
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub min_quantity: Option<u32>,
    pub price: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub min_quantity: Option<u32>,
    pub price: Option<String>,
    pub featured: Option<bool>,
    pub image: Option<String>,
}

impl Product {
    /// Merge a partial update; absent fields keep their current value.
    pub fn apply(&mut self, update: UpdateProductRequest, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(min_quantity) = update.min_quantity {
            self.min_quantity = min_quantity;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        self.updated_at = Some(now);
    }
}
