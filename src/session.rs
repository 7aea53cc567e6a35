//! Durable session state: the bearer token, its absolute expiry, and the
//! cached user snapshot, persisted as one JSON file in the data directory.
//!
//! Reads reload the file every time, so each request observes whatever token
//! is current at dispatch. The token and its expiry are always written in the
//! same file write; they cannot drift apart.

use crate::model::User;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Fixed validity window applied when a token is stored.
const TOKEN_TTL_HOURS: i64 = 24;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    fn load(&self) -> SessionData {
        match fs::read_to_string(&self.path) {
            // A malformed file counts as no session; the next write replaces it.
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => SessionData::default(),
        }
    }

    fn save(&self, data: &SessionData) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(data)?)
    }

    pub fn token(&self) -> Option<String> {
        self.load().token
    }

    pub fn user(&self) -> Option<User> {
        self.load().user
    }

    /// Stores the token together with its computed expiry.
    pub fn set_token(&self, token: &str) -> io::Result<()> {
        let mut data = self.load();
        data.token = Some(token.to_string());
        data.expires_at = Some(Utc::now() + Duration::hours(TOKEN_TTL_HOURS));
        self.save(&data)
    }

    /// Replaces the cached user snapshot, keeping the token untouched.
    pub fn set_user(&self, user: &User) -> io::Result<()> {
        let mut data = self.load();
        data.user = Some(user.clone());
        self.save(&data)
    }

    /// Removes token, expiry, and cached user. Safe to call when already
    /// cleared.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// A session with no recorded expiry counts as expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.load().expires_at {
            Some(expiry) => now > expiry,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_user() -> User {
        User {
            id: "1".to_string(),
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn test_fresh_store_is_expired() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.is_expired());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_set_token_records_token_and_expiry_together() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.set_token("abc").unwrap();

        assert_eq!(store.token().as_deref(), Some("abc"));
        assert!(!store.is_expired());
    }

    #[test]
    fn test_expiry_after_validity_window() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.set_token("abc").unwrap();

        let just_before = Utc::now() + Duration::hours(TOKEN_TTL_HOURS) - Duration::minutes(1);
        let just_after = Utc::now() + Duration::hours(TOKEN_TTL_HOURS) + Duration::minutes(1);
        assert!(!store.is_expired_at(just_before));
        assert!(store.is_expired_at(just_after));
    }

    #[test]
    fn test_clear_removes_everything_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.set_token("abc").unwrap();
        store.set_user(&test_user()).unwrap();

        store.clear().unwrap();
        assert!(store.token().is_none());
        assert!(store.user().is_none());
        assert!(store.is_expired());

        // Clearing an already-empty store succeeds.
        store.clear().unwrap();
    }

    #[test]
    fn test_user_snapshot_survives_beside_token() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.set_token("abc").unwrap();
        store.set_user(&test_user()).unwrap();

        assert_eq!(store.user().unwrap().name, "Ann");
        assert_eq!(store.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_malformed_file_counts_as_no_session() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SESSION_FILE), "not json{").unwrap();

        let store = SessionStore::new(dir.path());
        assert!(store.token().is_none());
        assert!(store.is_expired());
    }

    #[test]
    fn test_set_token_replaces_previous_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.set_token("first").unwrap();
        store.set_token("second").unwrap();
        assert_eq!(store.token().as_deref(), Some("second"));
        assert!(!store.is_expired());
    }
}
