//! User and session models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Redacted user view. The password hash never leaves the credential store
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub role: String,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

impl From<&Session> for AuthUser {
    fn from(session: &Session) -> Self {
        Self {
            id: session.user_id.clone(),
            username: session.username.clone(),
            role: session.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub user: AuthUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            token: "t".to_string(),
            user_id: "u".to_string(),
            username: "admin".to_string(),
            role: "admin".to_string(),
            created_at: expires_at - Duration::hours(24),
            expires_at,
        }
    }

    #[test]
    fn expiry_is_strictly_after_deadline() {
        let now = Utc::now();
        let session = session_expiring_at(now);
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::seconds(1)));
        assert!(!session.is_expired(now - Duration::seconds(1)));
    }

    #[test]
    fn sessions_persist_with_camel_case_fields() {
        let session = session_expiring_at(Utc::now());
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("expiresAt").is_some());
        assert!(json.get("user_id").is_none());
    }
}
