//! Identity provider - token persistence and user identity
//!
//! Resolves the user id that partitions every sync operation. A saved token
//! file makes the user "authenticated"; without one, everything falls back
//! to the fixed default identity.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::app_dir;

/// Identity used when no authentication has occurred.
pub const DEFAULT_USER_ID: &str = "default";

const TOKEN_FILE: &str = "auth_token.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    user_id: String,
    #[serde(default)]
    access_token: Option<String>,
}

pub struct AuthHandler {
    token_path: PathBuf,
    token: Option<StoredToken>,
}

impl AuthHandler {
    /// Load the saved token, if any. A corrupt token file is treated as
    /// logged-out rather than an error.
    pub fn load() -> Result<Self> {
        let token_path = app_dir()?.join(TOKEN_FILE);
        let token = match fs::read_to_string(&token_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(token) => Some(token),
                Err(e) => {
                    warn!("Could not parse saved token: {}", e);
                    None
                }
            },
            Err(_) => None,
        };
        Ok(Self { token_path, token })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The partition key for every sync engine call.
    pub fn user_id(&self) -> String {
        self.token
            .as_ref()
            .map(|token| token.user_id.clone())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.token
            .as_ref()
            .and_then(|token| token.access_token.as_deref())
    }

    pub fn login(&mut self, user_id: &str, access_token: Option<String>) -> Result<()> {
        let token = StoredToken {
            user_id: user_id.to_string(),
            access_token,
        };
        fs::write(&self.token_path, serde_json::to_string_pretty(&token)?)?;
        self.token = Some(token);
        info!("Saved authentication token");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path)?;
        }
        self.token = None;
        info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn setup_temp_home() -> tempfile::TempDir {
        let temp = tempfile::TempDir::new().unwrap();
        std::env::set_var("HOME", temp.path());
        temp
    }

    #[test]
    #[serial]
    fn test_fallback_identity() {
        let _temp = setup_temp_home();

        let auth = AuthHandler::load().unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.user_id(), DEFAULT_USER_ID);
        assert!(auth.access_token().is_none());
    }

    #[test]
    #[serial]
    fn test_login_logout_round_trip() {
        let _temp = setup_temp_home();

        let mut auth = AuthHandler::load().unwrap();
        auth.login("alice", Some("secret-token".to_string())).unwrap();
        assert!(auth.is_authenticated());
        assert_eq!(auth.user_id(), "alice");
        assert_eq!(auth.access_token(), Some("secret-token"));

        // A fresh handler sees the persisted token
        let reloaded = AuthHandler::load().unwrap();
        assert_eq!(reloaded.user_id(), "alice");

        let mut auth = reloaded;
        auth.logout().unwrap();
        assert_eq!(auth.user_id(), DEFAULT_USER_ID);

        let after = AuthHandler::load().unwrap();
        assert!(!after.is_authenticated());
    }

    #[test]
    #[serial]
    fn test_corrupt_token_file_means_logged_out() {
        let temp = setup_temp_home();

        let token_path = temp.path().join(".task-reminder").join(TOKEN_FILE);
        fs::create_dir_all(token_path.parent().unwrap()).unwrap();
        fs::write(&token_path, "{ not json").unwrap();

        let auth = AuthHandler::load().unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.user_id(), DEFAULT_USER_ID);
    }
}
