//! In-process session store
//!
//! Server-held state correlating a client's cookie with an authenticated
//! administrator. Tokens are random 256-bit values; entries expire after a
//! configurable TTL and are swept by a periodic task.

use dashmap::DashMap;
use std::sync::Arc;

use crate::util::{generate_session_token, now_millis};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "comanda_session";

#[derive(Debug, Clone)]
pub struct Session {
    pub admin_id: i64,
    pub username: String,
    pub created_at: i64,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    ttl_millis: i64,
}

impl SessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl_millis: ttl_hours * 60 * 60 * 1000,
        }
    }

    /// Establish a session for an administrator, returning the new token.
    pub fn create(&self, admin_id: i64, username: &str) -> String {
        let token = generate_session_token();
        self.sessions.insert(
            token.clone(),
            Session {
                admin_id,
                username: username.to_string(),
                created_at: now_millis(),
            },
        );
        token
    }

    /// Look up a token. Expired entries are removed on access.
    pub fn get(&self, token: &str) -> Option<Session> {
        let expired = match self.sessions.get(token) {
            Some(entry) => now_millis() - entry.created_at > self.ttl_millis,
            None => return None,
        };
        if expired {
            self.sessions.remove(token);
            return None;
        }
        self.sessions.get(token).map(|e| e.clone())
    }

    /// Terminate a session. Returns whether a session existed.
    pub fn remove(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop all expired sessions. Called from a periodic task.
    pub fn cleanup(&self) {
        let now = now_millis();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, s| now - s.created_at <= self.ttl_millis);
        // Logins may race the sweep, so the difference can only be a hint
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            tracing::debug!(removed, "Swept expired sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_get_remove() {
        let store = SessionStore::new(1);
        let token = store.create(7, "admin");
        let session = store.get(&token).unwrap();
        assert_eq!(session.admin_id, 7);
        assert_eq!(session.username, "admin");

        assert!(store.remove(&token));
        assert!(store.get(&token).is_none());
        assert!(!store.remove(&token));
    }

    #[test]
    fn test_expired_session_dropped() {
        // Zero TTL: any elapsed time expires the session
        let store = SessionStore::new(0);
        let token = store.create(1, "admin");
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(store.get(&token).is_none());
    }

    #[test]
    fn test_cleanup_sweeps_only_expired() {
        let expiring = SessionStore::new(0);
        let t = expiring.create(1, "admin");
        std::thread::sleep(std::time::Duration::from_millis(5));
        expiring.cleanup();
        assert!(expiring.sessions.get(&t).is_none());

        let fresh = SessionStore::new(24);
        let t = fresh.create(1, "admin");
        fresh.cleanup();
        assert!(fresh.get(&t).is_some());
    }
}
