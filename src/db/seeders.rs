//! First-boot seeding for the users and settings documents.

use anyhow::{anyhow, Result};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::{users, SettingsDocument, Store, User, SETTINGS, USERS};

/// Create the initial admin account when no users exist yet.
pub async fn ensure_admin_user(store: &Store, username: &str, password: &str) -> Result<()> {
    let existing: Vec<User> = store.load(USERS).await?.unwrap_or_default();
    if !existing.is_empty() {
        return Ok(());
    }

    let password_hash =
        users::hash_password(password).map_err(|e| anyhow!("failed to hash admin password: {e}"))?;
    let admin = User {
        id: Uuid::new_v4().to_string(),
        username: username.to_string(),
        password_hash,
        role: "admin".to_string(),
        created_at: Utc::now(),
    };
    store.save(USERS, &vec![admin]).await?;
    info!("Seeded default admin user '{}'", username);
    Ok(())
}

/// Write the default settings document when none has been persisted yet.
pub async fn ensure_default_settings(store: &Store) -> Result<()> {
    if store.load::<SettingsDocument>(SETTINGS).await?.is_none() {
        store.save(SETTINGS, &SettingsDocument::default()).await?;
        info!("Seeded default settings document");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeding_is_skipped_once_a_user_exists() {
        let store = Store::in_memory();
        ensure_admin_user(&store, "admin", "admin123").await.unwrap();
        let first: Vec<User> = store.load(USERS).await.unwrap().unwrap();

        ensure_admin_user(&store, "admin", "different").await.unwrap();
        let second: Vec<User> = store.load(USERS).await.unwrap().unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second[0].password_hash, first[0].password_hash);
    }

    #[tokio::test]
    async fn settings_seed_does_not_clobber_existing_document() {
        let store = Store::in_memory();
        let mut doc = SettingsDocument::default();
        doc.site.name = "Customized".to_string();
        store.save(SETTINGS, &doc).await.unwrap();

        ensure_default_settings(&store).await.unwrap();

        let loaded: SettingsDocument = store.load(SETTINGS).await.unwrap().unwrap();
        assert_eq!(loaded.site.name, "Customized");
    }
}
