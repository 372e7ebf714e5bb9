//! Session store: issuance, lookup, revocation.
//!
//! The full session list lives in one document. Issuing a session removes
//! every prior session for the same user before the new one is appended, so
//! a user has at most one active session. A revoked session never returns.

use chrono::{Duration, Utc};
use rand::Rng;

use super::{Session, Store, StoreError, User, SESSIONS};

/// Generate a random session token (256 bits, hex-encoded).
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Issue a session for `user`, superseding any it already holds.
pub async fn create(store: &Store, user: &User, ttl: Duration) -> Result<Session, StoreError> {
    let mut sessions: Vec<Session> = store.load(SESSIONS).await?.unwrap_or_default();
    sessions.retain(|s| s.user_id != user.id);

    let now = Utc::now();
    let session = Session {
        token: generate_token(),
        user_id: user.id.clone(),
        username: user.username.clone(),
        role: user.role.clone(),
        created_at: now,
        expires_at: now + ttl,
    };
    sessions.push(session.clone());
    store.save(SESSIONS, &sessions).await?;
    Ok(session)
}

pub async fn find(store: &Store, token: &str) -> Result<Option<Session>, StoreError> {
    let sessions: Vec<Session> = store.load(SESSIONS).await?.unwrap_or_default();
    Ok(sessions.into_iter().find(|s| s.token == token))
}

/// Remove the session holding `token`. Unknown tokens are a no-op.
pub async fn revoke(store: &Store, token: &str) -> Result<(), StoreError> {
    let mut sessions: Vec<Session> = store.load(SESSIONS).await?.unwrap_or_default();
    let before = sessions.len();
    sessions.retain(|s| s.token != token);
    if sessions.len() != before {
        store.save(SESSIONS, &sessions).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(id: &str, username: &str) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            password_hash: String::new(),
            role: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn tokens_are_unique_across_issuances() {
        let store = Store::in_memory();
        let alice = test_user("u1", "alice");
        let bob = test_user("u2", "bob");

        let first = create(&store, &alice, Duration::hours(24)).await.unwrap();
        let second = create(&store, &bob, Duration::hours(24)).await.unwrap();
        let third = create(&store, &alice, Duration::hours(24)).await.unwrap();

        assert_ne!(first.token, second.token);
        assert_ne!(first.token, third.token);
        assert_ne!(second.token, third.token);
        assert_eq!(first.token.len(), 64);
    }

    #[tokio::test]
    async fn new_login_supersedes_prior_session_for_same_user() {
        let store = Store::in_memory();
        let user = test_user("u1", "alice");

        let first = create(&store, &user, Duration::hours(24)).await.unwrap();
        let second = create(&store, &user, Duration::hours(24)).await.unwrap();

        assert!(find(&store, &first.token).await.unwrap().is_none());
        assert!(find(&store, &second.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn superseding_leaves_other_users_sessions_alone() {
        let store = Store::in_memory();
        let alice = test_user("u1", "alice");
        let bob = test_user("u2", "bob");

        let bob_session = create(&store, &bob, Duration::hours(24)).await.unwrap();
        create(&store, &alice, Duration::hours(24)).await.unwrap();
        create(&store, &alice, Duration::hours(24)).await.unwrap();

        assert!(find(&store, &bob_session.token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn revoke_is_idempotent() {
        let store = Store::in_memory();
        let user = test_user("u1", "alice");
        let session = create(&store, &user, Duration::hours(24)).await.unwrap();

        revoke(&store, &session.token).await.unwrap();
        assert!(find(&store, &session.token).await.unwrap().is_none());

        // Revoking again (or revoking an unknown token) is not an error.
        revoke(&store, &session.token).await.unwrap();
        revoke(&store, "no-such-token").await.unwrap();
    }
}
