//! Login, logout and token verification, plus the guard composed in front of
//! every protected route.
//!
//! A session moves from active to revoked by logout, by expiry detection at
//! verification time, or by being superseded when the same user logs in
//! again. Revocation is terminal; there is no renewal.

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap},
    Json,
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::api::error::ApiError;
use crate::db::{
    sessions, users, AuthUser, LoginRequest, LoginResponse, Session, Store, StoreError,
    VerifyResponse,
};
use crate::AppState;

/// Why a login attempt or token check failed. Every credential/token variant
/// surfaces as a 401 whose message does not reveal which check failed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer token supplied")]
    MissingToken,
    #[error("unknown session token")]
    InvalidToken,
    #[error("session expired")]
    Expired,
    #[error("username or password mismatch")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::unauthorized("Invalid username or password")
            }
            AuthError::Store(e) => e.into(),
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::Expired => {
                ApiError::unauthorized("Authentication required")
            }
        }
    }
}

/// Check credentials and issue a session, superseding any prior session the
/// user holds.
pub async fn authenticate(
    store: &Store,
    username: &str,
    password: &str,
    ttl: Duration,
) -> Result<(Session, AuthUser), AuthError> {
    // Unknown username and wrong password fail identically.
    let user = users::find_by_username(store, username)
        .await?
        .filter(|u| users::verify_password(password, &u.password_hash))
        .ok_or(AuthError::InvalidCredentials)?;

    let session = sessions::create(store, &user, ttl).await?;
    Ok((session, AuthUser::from(&user)))
}

/// Validate a bearer token against the session store. An expired session is
/// revoked as a side effect of being detected.
pub async fn verify_token(store: &Store, token: Option<&str>) -> Result<AuthUser, AuthError> {
    let token = token.ok_or(AuthError::MissingToken)?;
    let session = sessions::find(store, token)
        .await?
        .ok_or(AuthError::InvalidToken)?;

    if session.is_expired(Utc::now()) {
        sessions::revoke(store, token).await?;
        return Err(AuthError::Expired);
    }

    Ok(AuthUser::from(&session))
}

/// Extract the bearer token from request headers.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Login endpoint
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let ttl = Duration::hours(state.config.auth.session_ttl_hours);
    let (session, user) =
        authenticate(&state.store, &request.username, &request.password, ttl).await?;

    tracing::info!(username = %user.username, "User logged in");
    Ok(Json(LoginResponse {
        token: session.token,
        user,
    }))
}

/// Logout endpoint. Idempotent: a missing or unknown token still acks.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        sessions::revoke(&state.store, token).await?;
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Token verification endpoint
pub async fn verify(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, ApiError> {
    let user = verify_token(&state.store, bearer_token(&headers)).await?;
    Ok(Json(VerifyResponse { user }))
}

/// Guard: extracting an [`AuthUser`] validates the caller's token before the
/// handler body runs, so a rejected request never reaches a mutation.
#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        verify_token(&state.store, bearer_token(&parts.headers))
            .await
            .map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ensure_admin_user, SESSIONS};

    async fn seeded_store() -> Store {
        let store = Store::in_memory();
        ensure_admin_user(&store, "admin", "admin123").await.unwrap();
        store
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_indistinguishable() {
        let store = seeded_store().await;

        let unknown = authenticate(&store, "nobody", "admin123", Duration::hours(24))
            .await
            .unwrap_err();
        let wrong = authenticate(&store, "admin", "wrong", Duration::hours(24))
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn login_issues_distinct_tokens() {
        let store = seeded_store().await;

        let (first, _) = authenticate(&store, "admin", "admin123", Duration::hours(24))
            .await
            .unwrap();
        let (second, _) = authenticate(&store, "admin", "admin123", Duration::hours(24))
            .await
            .unwrap();

        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn second_login_invalidates_first_token() {
        let store = seeded_store().await;

        let (first, _) = authenticate(&store, "admin", "admin123", Duration::hours(24))
            .await
            .unwrap();
        assert!(verify_token(&store, Some(&first.token)).await.is_ok());

        let (second, _) = authenticate(&store, "admin", "admin123", Duration::hours(24))
            .await
            .unwrap();

        let err = verify_token(&store, Some(&first.token)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
        assert!(verify_token(&store, Some(&second.token)).await.is_ok());
    }

    #[tokio::test]
    async fn missing_and_unknown_tokens_are_rejected() {
        let store = seeded_store().await;

        let missing = verify_token(&store, None).await.unwrap_err();
        assert!(matches!(missing, AuthError::MissingToken));

        let unknown = verify_token(&store, Some("deadbeef")).await.unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_session_is_rejected_and_revoked() {
        let store = seeded_store().await;

        // A TTL in the past yields a session that is expired on arrival.
        let (session, _) = authenticate(&store, "admin", "admin123", Duration::hours(-1))
            .await
            .unwrap();

        let err = verify_token(&store, Some(&session.token)).await.unwrap_err();
        assert!(matches!(err, AuthError::Expired));

        // Opportunistic revocation removed it from the store, so a retry now
        // fails as unknown rather than expired.
        let sessions: Vec<Session> = store.load(SESSIONS).await.unwrap().unwrap();
        assert!(sessions.is_empty());
        let err = verify_token(&store, Some(&session.token)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn verified_user_view_is_redacted() {
        let store = seeded_store().await;
        let (session, user) = authenticate(&store, "admin", "admin123", Duration::hours(24))
            .await
            .unwrap();

        let verified = verify_token(&store, Some(&session.token)).await.unwrap();
        assert_eq!(verified, user);
        assert_eq!(verified.username, "admin");
        assert_eq!(verified.role, "admin");
        // AuthUser carries no password material by construction; the JSON
        // view must not either.
        let json = serde_json::to_value(&verified).unwrap();
        assert!(json.get("passwordHash").is_none());
    }
}
