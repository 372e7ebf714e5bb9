pub mod auth;
pub mod error;

mod contacts;
mod products;
mod quotes;
mod settings;
mod uploads;
mod validation;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/verify", get(auth::verify));

    // Reads and form submissions are public; every mutation handler takes an
    // AuthUser argument, so the guard runs before any state is touched.
    let api_routes = Router::new()
        // Site content
        .route("/settings", get(settings::get_settings))
        .route("/settings", put(settings::update_settings))
        .route("/settings/categories", get(settings::get_categories))
        .route("/settings/categories", put(settings::update_categories))
        // Catalog
        .route("/products", get(products::list_products))
        .route("/products", post(products::create_product))
        .route("/products/:id", get(products::get_product))
        .route("/products/:id", put(products::update_product))
        .route("/products/:id", delete(products::delete_product))
        // Inquiries
        .route("/contact", post(contacts::submit_contact))
        .route("/contact", get(contacts::list_contacts))
        .route("/quote", post(quotes::submit_quote))
        .route("/quote", get(quotes::list_quotes))
        // Admin uploads
        .route("/uploads", post(uploads::upload_image));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
