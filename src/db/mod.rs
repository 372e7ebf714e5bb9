mod models;
mod seeders;
mod store;

pub mod sessions;
pub mod users;

pub use models::*;
pub use seeders::{ensure_admin_user, ensure_default_settings};
pub use store::{DocumentStore, FileStore, MemoryStore, Store, StoreError};

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Collection names. Each maps to one JSON document holding the whole data
/// set for that concern.
pub const USERS: &str = "users";
pub const SESSIONS: &str = "sessions";
pub const SETTINGS: &str = "settings";
pub const PRODUCTS: &str = "products";
pub const CONTACTS: &str = "contacts";
pub const QUOTES: &str = "quotes";

pub async fn init(data_dir: &Path) -> Result<Store> {
    info!("Initializing document store at {}", data_dir.display());
    tokio::fs::create_dir_all(data_dir).await?;
    Ok(Store::new(Arc::new(FileStore::new(data_dir))))
}
