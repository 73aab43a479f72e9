//! Session storage

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::{OAuthTokens, SessionUser};

pub const SESSION_TTL_DAYS: i64 = 30;
/// Lifetime of a session that has only started signing in
pub const SIGN_IN_TTL_MINUTES: i64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// CSRF token of a sign-in in progress
    pub oauth_state: Option<String>,
    pub user: Option<SessionUser>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            oauth_state: None,
            user: None,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        }
    }

    /// Anonymous session holding the CSRF state of a sign-in
    pub fn sign_in_attempt(now: DateTime<Utc>, oauth_state: String) -> Self {
        Self {
            oauth_state: Some(oauth_state),
            user: None,
            expires_at: now + Duration::minutes(SIGN_IN_TTL_MINUTES),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Live session by id; expired sessions are dropped and read as absent
    async fn load(&self, id: &str) -> Option<Session>;

    async fn save(&self, id: &str, session: Session);

    async fn remove(&self, id: &str);

    /// Replace the signed-in user's tokens, e.g. after a refresh
    async fn update_tokens(&self, id: &str, tokens: OAuthTokens) {
        if let Some(mut session) = self.load(id).await {
            if let Some(user) = session.user.as_mut() {
                user.tokens = tokens;
                self.save(id, session).await;
            }
        }
    }
}

/// Process-local store; sessions are lost on restart
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &str) -> Option<Session> {
        let now = Utc::now();
        let session = self.sessions.read().await.get(id).cloned()?;
        if session.is_expired(now) {
            self.sessions.write().await.remove(id);
            return None;
        }
        Some(session)
    }

    /// Also drops every expired session, so abandoned ones never pile up
    async fn save(&self, id: &str, session: Session) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired(now));
        sessions.insert(id.to_string(), session);
    }

    async fn remove(&self, id: &str) {
        self.sessions.write().await.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(token: &str) -> SessionUser {
        SessionUser {
            id: "u1".to_string(),
            display_name: "Ada".to_string(),
            email: None,
            tokens: OAuthTokens {
                access_token: token.to_string(),
                refresh_token: Some("r".to_string()),
                expires_at: None,
            },
        }
    }

    #[tokio::test]
    async fn test_save_load_remove() {
        let store = MemorySessionStore::new();
        assert!(store.load("s1").await.is_none());

        let session = Session::new(Utc::now());
        store.save("s1", session.clone()).await;
        assert_eq!(store.load("s1").await, Some(session));

        store.remove("s1").await;
        assert!(store.load("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = MemorySessionStore::new();
        let mut session = Session::new(Utc::now());
        session.expires_at = Utc::now() - Duration::seconds(1);
        store.save("old", session).await;

        assert!(store.load("old").await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_save_sweeps_expired_sessions() {
        let store = MemorySessionStore::new();
        let now = Utc::now();
        for i in 0..100 {
            let mut session = Session::new(now);
            session.expires_at = now - Duration::minutes(1);
            store.save(&format!("old-{}", i), session).await;
        }
        for i in 0..10 {
            store.save(&format!("live-{}", i), Session::new(now)).await;
        }
        assert_eq!(store.len().await, 10);
        assert!(store.load("live-3").await.is_some());
    }

    #[test]
    fn test_sign_in_attempt_is_short_lived() {
        let now = Utc::now();
        let session = Session::sign_in_attempt(now, "csrf".to_string());
        assert_eq!(session.oauth_state.as_deref(), Some("csrf"));
        assert!(session.user.is_none());
        assert!(!session.is_expired(now + Duration::minutes(SIGN_IN_TTL_MINUTES - 1)));
        assert!(session.is_expired(now + Duration::minutes(SIGN_IN_TTL_MINUTES)));
    }

    #[tokio::test]
    async fn test_update_tokens() {
        let store = MemorySessionStore::new();
        let mut session = Session::new(Utc::now());
        session.user = Some(user("old"));
        store.save("s1", session).await;

        store
            .update_tokens(
                "s1",
                OAuthTokens { access_token: "new".to_string(), refresh_token: Some("r".to_string()), expires_at: None },
            )
            .await;
        let loaded = store.load("s1").await.unwrap();
        assert_eq!(loaded.user.unwrap().tokens.access_token, "new");
    }
}
