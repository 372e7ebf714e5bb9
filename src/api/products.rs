//! Catalog endpoints. Reads are public; every mutation sits behind the guard.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::{ApiError, ValidationErrorBuilder};
use crate::db::{
    AuthUser, CreateProductRequest, Product, UpdateProductRequest, DEFAULT_MIN_QUANTITY,
    PLACEHOLDER_IMAGE, PRODUCTS,
};
use crate::AppState;

pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products: Vec<Product> = state.store.load_or_default(PRODUCTS).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let products: Vec<Product> = state.store.load_or_default(PRODUCTS).await?;
    let product = products
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ApiError::not_found("Product not found"))?;
    Ok(Json(product))
}

pub async fn create_product(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if request.name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
    if request.description.trim().is_empty() {
        errors.add("description", "Description is required");
    }
    if request.category.trim().is_empty() {
        errors.add("category", "Category is required");
    }
    errors.finish()?;

    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        description: request.description.trim().to_string(),
        category: request.category.trim().to_string(),
        min_quantity: request.min_quantity.unwrap_or(DEFAULT_MIN_QUANTITY),
        price: request.price.unwrap_or_else(|| "On request".to_string()),
        featured: request.featured,
        image: request
            .image
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        created_at: Utc::now(),
        updated_at: None,
    };

    let mut products: Vec<Product> = state.store.load_or_default(PRODUCTS).await?;
    products.push(product.clone());
    state.store.save(PRODUCTS, &products).await?;

    tracing::info!(username = %user.username, product = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let mut products: Vec<Product> = state.store.load_or_default(PRODUCTS).await?;
    let product = products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    product.apply(request, Utc::now());
    let updated = product.clone();
    state.store.save(PRODUCTS, &products).await?;

    tracing::info!(username = %user.username, product = %updated.name, "Product updated");
    Ok(Json(updated))
}

pub async fn delete_product(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut products: Vec<Product> = state.store.load_or_default(PRODUCTS).await?;
    let before = products.len();
    products.retain(|p| p.id != id);
    if products.len() == before {
        return Err(ApiError::not_found("Product not found"));
    }
    state.store.save(PRODUCTS, &products).await?;

    tracing::info!(username = %user.username, product_id = %id, "Product deleted");
    Ok(Json(serde_json::json!({ "ok": true })))
}
