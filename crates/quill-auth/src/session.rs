use std::collections::HashMap;
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

/// One logged-in session. A user may hold any number of these concurrently.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Process-lifetime session table: opaque bearer token -> session.
///
/// State lives only in memory and is lost on restart. By default sessions
/// never expire; a TTL can be configured, in which case `resolve` treats
/// entries whose age has reached the TTL as gone. There is no eviction
/// loop and no capacity bound.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Option<Duration>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: None,
        }
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    /// Create a session for `user_id` and return its token.
    ///
    /// Tokens are 32 bytes from the thread-local CSPRNG, URL-safe base64
    /// without padding — 256 bits of entropy, unguessable.
    pub fn create(&self, user_id: &str) -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let session_id = B64.encode(bytes);

        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.insert(
            session_id.clone(),
            Session {
                user_id: user_id.to_string(),
                created_at: Utc::now(),
            },
        );
        session_id
    }

    /// Look up a session token. Returns `None` for unknown tokens and,
    /// when a TTL is set, for entries at or past their TTL.
    pub fn resolve(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let session = sessions.get(session_id)?;
        if let Some(ttl) = self.ttl {
            if Utc::now() - session.created_at >= ttl {
                return None;
            }
        }
        Some(session.clone())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_resolve() {
        let store = SessionStore::new();
        let id = store.create("user-1");
        let session = store.resolve(&id).unwrap();
        assert_eq!(session.user_id, "user-1");
    }

    #[test]
    fn unknown_token_is_none() {
        let store = SessionStore::new();
        assert!(store.resolve("nope").is_none());
    }

    #[test]
    fn tokens_are_unique_and_concurrent_sessions_coexist() {
        let store = SessionStore::new();
        let a = store.create("user-1");
        let b = store.create("user-1");
        assert_ne!(a, b);
        assert_eq!(store.resolve(&a).unwrap().user_id, "user-1");
        assert_eq!(store.resolve(&b).unwrap().user_id, "user-1");
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let store = SessionStore::with_ttl(Duration::zero());
        let id = store.create("user-1");
        assert!(store.resolve(&id).is_none());
    }

    #[test]
    fn generous_ttl_still_resolves() {
        let store = SessionStore::with_ttl(Duration::hours(1));
        let id = store.create("user-1");
        assert!(store.resolve(&id).is_some());
    }
}
