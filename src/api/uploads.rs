//! Admin image uploads. Files land in the uploads directory and are served
//! statically under `/uploads`.

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::db::AuthUser;
use crate::AppState;

const ALLOWED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "gif",
    }
}

pub async fn upload_image(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed multipart body"))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("Missing content type"))?;
        if !ALLOWED_TYPES.contains(&content_type.as_str()) {
            return Err(ApiError::bad_request(
                "Unsupported file type; images only (JPEG, PNG, WebP, GIF)",
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::bad_request("Failed to read upload"))?;

        // Name comes from us, extension from the validated content type;
        // nothing client-controlled reaches the filesystem path.
        let filename = format!("upload-{}.{}", Uuid::new_v4(), extension_for(&content_type));
        let uploads_dir = &state.config.server.uploads_dir;
        tokio::fs::create_dir_all(uploads_dir).await.map_err(|e| {
            tracing::error!("Failed to create uploads directory: {}", e);
            ApiError::internal("Failed to store upload")
        })?;
        tokio::fs::write(uploads_dir.join(&filename), &data)
            .await
            .map_err(|e| {
                tracing::error!("Failed to write upload: {}", e);
                ApiError::internal("Failed to store upload")
            })?;

        tracing::info!(username = %user.username, file = %filename, bytes = data.len(), "Image uploaded");
        return Ok(Json(
            serde_json::json!({ "url": format!("/uploads/{filename}") }),
        ));
    }

    Err(ApiError::bad_request("No file provided"))
}
