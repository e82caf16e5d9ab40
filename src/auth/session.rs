//! The session persisted in client storage

use log::warn;

use super::storage::{TokenStorage, TOKEN_KEY, USERNAME_KEY};
use super::types::AuthResponse;
use crate::error::Error;

/// Session data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The bearer token
    pub access_token: String,

    /// The token type
    pub token_type: String,

    /// The username the token was issued for
    pub username: Option<String>,
}

impl Session {
    /// Create a session from an auth response
    pub fn from_response(response: &AuthResponse, username: &str) -> Self {
        Self {
            access_token: response.access_token.clone(),
            token_type: response.token_type.clone(),
            username: Some(username.to_string()),
        }
    }

    /// Stored bearer token, ignoring empty values
    pub fn token(storage: &dyn TokenStorage) -> Option<String> {
        storage.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// Stored username
    pub fn username(storage: &dyn TokenStorage) -> Option<String> {
        storage.get(USERNAME_KEY)
    }

    /// Load the stored session, if a token is present
    pub fn load(storage: &dyn TokenStorage) -> Option<Self> {
        Self::token(storage).map(|access_token| Self {
            access_token,
            token_type: "Bearer".to_string(),
            username: Self::username(storage),
        })
    }

    /// Write token and username to storage
    pub fn persist(&self, storage: &dyn TokenStorage) -> Result<(), Error> {
        storage.set(TOKEN_KEY, &self.access_token)?;
        match &self.username {
            Some(username) => storage.set(USERNAME_KEY, username),
            None => storage.remove(USERNAME_KEY),
        }
    }

    /// Remove token and username together
    ///
    /// Failures are logged; both keys are always attempted.
    pub fn clear(storage: &dyn TokenStorage) {
        for key in [TOKEN_KEY, USERNAME_KEY] {
            if let Err(err) = storage.remove(key) {
                warn!("failed to remove {} from storage: {}", key, err);
            }
        }
    }
}
