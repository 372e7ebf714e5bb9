//! Credential store: user lookup and password hashing.
//!
//! Users are created by the first-boot seeder only; this module exposes no
//! update or delete operations.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::{Store, StoreError, User, USERS};

pub async fn find_by_username(store: &Store, username: &str) -> Result<Option<User>, StoreError> {
    let users: Vec<User> = store.load(USERS).await?.unwrap_or_default();
    Ok(users.into_iter().find(|u| u.username == username))
}

/// Hash a password using Argon2 with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
