use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    auth_key: String,
}

impl Credentials {
    /// Both values must be non-empty; their validity is only known once the
    /// provider answers a request.
    pub fn new(email: impl Into<String>, auth_key: impl Into<String>) -> Result<Self> {
        let email = email.into();
        let auth_key = auth_key.into();

        if email.trim().is_empty() {
            return Err(Error::MissingCredential("email"));
        }
        if auth_key.trim().is_empty() {
            return Err(Error::MissingCredential("auth_key"));
        }

        Ok(Self { email, auth_key })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn auth_key(&self) -> &str {
        &self.auth_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("auth_key", &"<redacted>")
            .finish()
    }
}

/// Authenticated access to the provider's REST API.
///
/// Paths are relative to the API base (e.g. `/zones`). Responses are decoded
/// JSON with any provider envelope already removed.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    async fn put(&self, path: &str, body: &Value) -> Result<Value>;
}
