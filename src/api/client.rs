use super::constants::{self, TOKEN_HEADER, USER_AGENT};
use super::models::{ErrorResponse, VaultResponse};
use crate::error::{Error, Result};
use log::debug;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::fmt;

/// Session handle for one Vault address, optionally carrying a token.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Clone)]
pub struct VaultClient {
    address: String,
    token: Option<String>,
    http_client: reqwest::Client,
}

impl fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultClient")
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl VaultClient {
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| Error::Http {
                url: address.clone(),
                source,
            })?;

        Ok(Self::with_http_client(address, http_client))
    }

    /// Create a session with a custom HTTP client configuration
    pub fn with_http_client(address: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            address: address.into(),
            token: None,
            http_client,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// A copy of this session that authenticates with `token` instead.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        let mut session = self.clone();
        session.set_token(token);
        session
    }

    /// GET `path`. `Ok(None)` when nothing exists there.
    pub async fn read(&self, path: &str) -> Result<Option<VaultResponse>> {
        self.send(Method::GET, path, &[], None)
            .await?
            .into_optional()
    }

    /// LIST `path`. `Ok(None)` when the location has no children.
    pub async fn list(&self, path: &str) -> Result<Option<VaultResponse>> {
        self.send(Method::GET, path, &[("list", "true")], None)
            .await?
            .into_optional()
    }

    pub async fn write(&self, path: &str, body: &Value) -> Result<Option<VaultResponse>> {
        self.send(Method::POST, path, &[], Some(body))
            .await?
            .into_response()
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, &[], None)
            .await?
            .into_response()
            .map(|_| ())
    }

    /// Look up the token attached to this session.
    pub async fn lookup_self(&self) -> Result<VaultResponse> {
        let path = constants::auth::TOKEN_LOOKUP_SELF;
        self.send(Method::GET, path, &[], None)
            .await?
            .into_response()?
            .ok_or_else(|| Error::Api {
                status: StatusCode::NO_CONTENT.as_u16(),
                path: path.to_string(),
                message: "empty token lookup response".to_string(),
            })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Reply> {
        let url = constants::api_url(&self.address, path);
        debug!("{} {}", method, url);

        let mut request = self.http_client.request(method, &url);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| Error::Http {
            url: url.clone(),
            source,
        })?;
        let status = response.status();
        debug!("{} status: {}", path, status);

        let body = response
            .text()
            .await
            .map_err(|source| Error::Http { url, source })?;

        Ok(Reply {
            path: path.to_string(),
            status,
            body,
        })
    }
}

struct Reply {
    path: String,
    status: StatusCode,
    body: String,
}

impl Reply {
    fn into_optional(self) -> Result<Option<VaultResponse>> {
        if self.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.into_response()
    }

    fn into_response(self) -> Result<Option<VaultResponse>> {
        if !self.status.is_success() {
            return Err(Error::Api {
                status: self.status.as_u16(),
                message: error_message(self.status, &self.body),
                path: self.path,
            });
        }
        if self.body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&self.body)
            .map(Some)
            .map_err(|e| Error::Api {
                status: self.status.as_u16(),
                path: self.path,
                message: format!("invalid response body: {}", e),
            })
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) if !response.errors.is_empty() => response.errors.join("; "),
        _ => status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    }
}
