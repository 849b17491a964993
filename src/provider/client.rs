//! Identity-provider REST client
//!
//! One method per upstream operation. Admin methods obtain a fresh
//! service-account token on every call; nothing is cached or retried, and a
//! transport-level failure surfaces as the operation's upstream failure
//! rather than an unhandled error.
//!
//! # Security
//!
//! The client secret and tokens are never logged or included in error
//! messages; errors carry only the fixed per-operation message and status.

use std::collections::HashMap;

use reqwest::{Client, Method, StatusCode, header};
use serde_json::Value;
use tracing::{debug, warn};

use super::types::TokenResponse;
use crate::config::ProviderConfig;
use crate::{Error, Result};

/// Client for the identity provider's introspection and admin APIs
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: Client,
    base_url: String,
    realm: String,
    client_id: String,
    client_secret: String,
}

impl ProviderClient {
    /// Create a client from provider settings. The configured request
    /// timeout applies to every outbound call.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            realm: config.realm.clone(),
            client_id: config.admin_client_id.clone(),
            client_secret: config.resolve_client_secret(),
        })
    }

    fn realm_url(&self, path: &str) -> String {
        format!("{}/realms/{}{path}", self.base_url, self.realm)
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/admin/realms/{}{path}", self.base_url, self.realm)
    }

    /// Validate a bearer token and return the provider's userinfo claims.
    ///
    /// The Authorization header value is forwarded verbatim. Any outcome
    /// other than a 200 with a JSON body means the token is invalid or
    /// expired; the gateway does not distinguish further.
    pub async fn userinfo(&self, authorization: &str) -> Result<Value> {
        let response = self
            .http
            .get(self.realm_url("/protocol/openid-connect/userinfo"))
            .header(header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Userinfo request failed");
                Error::TokenRejected
            })?;

        if response.status() != StatusCode::OK {
            debug!(status = %response.status(), "Token rejected by introspection");
            return Err(Error::TokenRejected);
        }

        response.json().await.map_err(|e| {
            warn!(error = %e, "Malformed userinfo response");
            Error::TokenRejected
        })
    }

    /// Obtain a fresh service-account token via the client-credentials
    /// grant. Every failure mode (non-200, transport error, malformed body)
    /// collapses into [`Error::AdminToken`].
    pub async fn service_token(&self) -> Result<String> {
        let mut params = HashMap::new();
        params.insert("grant_type", "client_credentials");
        params.insert("client_id", self.client_id.as_str());
        params.insert("client_secret", self.client_secret.as_str());

        let response = self
            .http
            .post(self.realm_url("/protocol/openid-connect/token"))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Service-account token request failed");
                Error::AdminToken
            })?;

        if response.status() != StatusCode::OK {
            warn!(status = %response.status(), "Service-account token request rejected");
            return Err(Error::AdminToken);
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Malformed token response");
            Error::AdminToken
        })?;

        Ok(token.access_token)
    }

    /// Groups the given user belongs to
    pub async fn user_groups(&self, user_id: &str) -> Result<Value> {
        self.admin_call(
            Method::GET,
            &format!("/users/{user_id}/groups"),
            None,
            StatusCode::OK,
            "Unable to retrieve user groups",
        )
        .await
    }

    /// All groups in the realm
    pub async fn list_groups(&self) -> Result<Value> {
        self.admin_call(
            Method::GET,
            "/groups",
            None,
            StatusCode::OK,
            "Failed to retrieve groups",
        )
        .await
    }

    /// All users in the realm
    pub async fn list_users(&self) -> Result<Value> {
        self.admin_call(
            Method::GET,
            "/users",
            None,
            StatusCode::OK,
            "Failed to retrieve users",
        )
        .await
    }

    /// Create a user from a provider user representation
    pub async fn create_user(&self, representation: Value) -> Result<()> {
        self.admin_call(
            Method::POST,
            "/users",
            Some(representation),
            StatusCode::CREATED,
            "Failed to create user",
        )
        .await?;
        Ok(())
    }

    /// Delete a user by id
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        self.admin_call(
            Method::DELETE,
            &format!("/users/{user_id}"),
            None,
            StatusCode::NO_CONTENT,
            "Failed to delete user",
        )
        .await?;
        Ok(())
    }

    /// Update a user; the body is passed through untouched
    pub async fn update_user(&self, user_id: &str, body: Value) -> Result<()> {
        self.admin_call(
            Method::PUT,
            &format!("/users/{user_id}"),
            Some(body),
            StatusCode::NO_CONTENT,
            "Failed to update user",
        )
        .await?;
        Ok(())
    }

    /// Add a user to a group (idempotent on the provider side)
    pub async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> Result<()> {
        self.admin_call(
            Method::PUT,
            &format!("/users/{user_id}/groups/{group_id}"),
            None,
            StatusCode::NO_CONTENT,
            "Failed to add user to group",
        )
        .await?;
        Ok(())
    }

    /// Issue one admin API call with a freshly obtained service token.
    ///
    /// A response with the expected status succeeds; any other status
    /// propagates upstream's code with the fixed `failure` message. A
    /// transport error (connect failure, timeout) maps to 502 with the same
    /// message. The service token is acquired first, so a token failure
    /// short-circuits before the admin endpoint is touched.
    async fn admin_call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        expected: StatusCode,
        failure: &'static str,
    ) -> Result<Value> {
        let token = self.service_token().await?;

        let mut request = self
            .http
            .request(method, self.admin_url(path))
            .bearer_auth(&token);
        if let Some(ref body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, path, "Admin request failed");
            Error::upstream(StatusCode::BAD_GATEWAY.as_u16(), failure)
        })?;

        let status = response.status();
        if status != expected {
            debug!(status = %status, path, "Admin request returned unexpected status");
            return Err(Error::upstream(status.as_u16(), failure));
        }

        // 201/204 responses carry no meaningful body
        if expected == StatusCode::OK {
            response.json().await.map_err(|e| {
                warn!(error = %e, path, "Malformed admin response");
                Error::upstream(StatusCode::BAD_GATEWAY.as_u16(), failure)
            })
        } else {
            Ok(Value::Null)
        }
    }
}
