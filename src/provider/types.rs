//! Request/response types for the identity-provider API

use serde::Deserialize;
use serde_json::{Value, json};

/// Inbound payload for user creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// Login name for the new user
    pub username: String,
    /// Email address
    pub email: String,
    /// Initial password
    pub password: String,
}

impl CreateUserRequest {
    /// Translate into the provider's user representation: the account is
    /// enabled immediately and the password becomes its first credential.
    #[must_use]
    pub fn into_representation(self) -> Value {
        json!({
            "username": self.username,
            "email": self.email,
            "enabled": true,
            "credentials": [{ "type": "password", "value": self.password }],
        })
    }
}

/// Token endpoint response (client-credentials grant)
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}
